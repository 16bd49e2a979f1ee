//! Board tests - grid storage, row removal and line clearing

use blockfall::core::Board;
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..board.width() as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::standard();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    // All cells should be empty
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_custom_dimensions() {
    let board = Board::new(7, 12);
    assert_eq!(board.width(), 7);
    assert_eq!(board.height(), 12);
    assert_eq!(board.cells().len(), 84);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_wider_than_i8_is_capped_and_usable() {
    let mut board = Board::new(200, 4);
    assert_eq!(board.width(), MAX_BOARD_DIM);
    assert!(board.set(0, 0, Some(PieceKind::I)));
    assert!(!board.is_out_of_bounds(0, 0));

    // A full capped row still clears.
    fill_row(&mut board, 3, PieceKind::L);
    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.get(0, 1), Some(Some(PieceKind::I)));

    let mut tall = Board::new(10, 130);
    assert_eq!(tall.height(), MAX_BOARD_DIM);
    assert!(tall.set(0, 0, Some(PieceKind::I)));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::standard();

    // Negative coordinates
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);

    // Beyond bounds
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::standard();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(0, 0, Some(PieceKind::I)));
    assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));

    // Clear a cell
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    // Out of bounds writes are rejected
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_is_row_full() {
    let mut board = Board::standard();
    assert!(!board.is_row_full(19));

    fill_row(&mut board, 19, PieceKind::I);
    assert!(board.is_row_full(19));

    board.set(3, 19, None);
    assert!(!board.is_row_full(19));

    assert!(!board.is_row_full(20));
}

#[test]
fn test_remove_row_out_of_bounds_is_noop() {
    let mut board = Board::standard();
    board.set(0, 19, Some(PieceKind::O));
    assert!(!board.remove_row(20));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_rows_5_and_8_compacts_board() {
    let mut board = Board::standard();

    // Distinct markers in rows 0-4, row 6, row 7 and row 19.
    let markers = [
        (0, PieceKind::I),
        (1, PieceKind::O),
        (2, PieceKind::T),
        (3, PieceKind::S),
        (4, PieceKind::Z),
        (6, PieceKind::J),
        (7, PieceKind::L),
        (19, PieceKind::T),
    ];
    for &(y, kind) in &markers {
        board.set(y % 10, y, Some(kind));
    }
    fill_row(&mut board, 5, PieceKind::Z);
    fill_row(&mut board, 8, PieceKind::J);

    assert_eq!(board.clear_full_rows(), 2);

    // Two fresh empty rows on top.
    for y in 0..2 {
        assert!(board.row(y).unwrap().iter().all(|c| c.is_none()));
    }
    // Rows 0-4 moved down by two, rows 6-7 by one, rows below 8 untouched.
    for &(y, kind) in &markers {
        let new_y = match y {
            0..=4 => y + 2,
            6 | 7 => y + 1,
            _ => y,
        };
        assert_eq!(board.get(y % 10, new_y), Some(Some(kind)), "marker from row {}", y);
    }
    assert_eq!(board.filled_count(), markers.len());
}

#[test]
fn test_clear_four_adjacent_rows() {
    let mut board = Board::standard();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(4, 15, Some(PieceKind::L));

    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_can_lock_allows_cells_above_board() {
    let board = Board::standard();
    assert!(board.can_lock(&[(4, -1), (4, 0)]));
    assert!(!board.can_lock(&[(-1, -1)]));
    assert!(!board.can_lock(&[(0, 20)]));
}

#[test]
fn test_clear_resets_every_cell() {
    let mut board = Board::standard();
    fill_row(&mut board, 10, PieceKind::S);
    board.clear();
    assert_eq!(board.filled_count(), 0);
}
