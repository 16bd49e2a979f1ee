//! Rotation tests - matrix rotation, wall kick order and rejection

use blockfall::core::{collides, try_rotate, Board, EngineConfig, GameState, Randomizer, Tetromino};
use blockfall::types::{PieceKind, WALL_KICKS};

#[test]
fn test_kick_order() {
    assert_eq!(WALL_KICKS, [(-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)]);
}

#[test]
fn test_four_rotations_in_open_space_round_trip() {
    let board = Board::standard();
    for kind in PieceKind::ALL {
        let start = Tetromino::at(kind, 3, 8);
        let mut piece = start;
        for _ in 0..4 {
            let (rotated, kick) = try_rotate(&board, &piece).unwrap();
            assert_eq!(kick, (0, 0));
            piece = rotated;
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_vertical_i_flush_left_kicks_right() {
    let board = Board::standard();
    // Vertical I occupies matrix column 2; x = -2 puts it in board column 0.
    let mut piece = Tetromino::at(PieceKind::I, -2, 5);
    piece.matrix = piece.matrix.rotated_cw();
    assert!(!collides(&board, &piece, 0, 0));

    // Back to horizontal: rows use matrix row 2 at columns -2..=1. Left 1 fails,
    // right 1 still reaches column -1, so up 1 fails too; left 2 fails; right 2 fits.
    let (rotated, kick) = try_rotate(&board, &piece).unwrap();
    assert_eq!(kick, (2, 0));
    assert_eq!((rotated.x, rotated.y), (0, 5));
    assert!(!collides(&board, &rotated, 0, 0));
}

#[test]
fn test_t_flush_left_uses_first_fitting_kick() {
    let board = Board::standard();
    // T with its stem on the right, matrix column 0 hanging off the left wall.
    let mut piece = Tetromino::at(PieceKind::T, -1, 5);
    piece.matrix = piece.matrix.rotated_cw();
    assert!(!collides(&board, &piece, 0, 0));

    // The next orientation spans matrix columns 0..=2: left 1 fails, right 1 fits.
    let (rotated, kick) = try_rotate(&board, &piece).unwrap();
    assert_eq!(kick, (1, 0));
    assert_eq!((rotated.x, rotated.y), (0, 5));
}

#[test]
fn test_blocked_rotation_leaves_piece_unchanged() {
    // Rows 0 and 3 filled: only a horizontal I fits in the two-row gap.
    let mut board = Board::new(4, 4);
    for x in 0..4 {
        board.set(x, 0, Some(PieceKind::O));
        board.set(x, 3, Some(PieceKind::O));
    }
    let piece = Tetromino::at(PieceKind::I, 0, 0);
    assert!(!collides(&board, &piece, 0, 0));
    assert!(try_rotate(&board, &piece).is_none());

    let mut state = GameState::from_board(
        EngineConfig::default(),
        board,
        Randomizer::scripted(vec![PieceKind::I]),
    );
    assert!(state.start());
    let before = state.current();
    assert_eq!(before, Some(piece));

    assert!(!state.rotate());
    assert_eq!(state.current(), before);
    assert!(state.is_running());
}

#[test]
fn test_o_rotation_is_stable() {
    let board = Board::standard();
    let piece = Tetromino::at(PieceKind::O, 4, 4);
    let (rotated, kick) = try_rotate(&board, &piece).unwrap();
    assert_eq!(kick, (0, 0));
    assert_eq!(rotated, piece);
}
