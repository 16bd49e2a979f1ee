//! Rotation system - matrix rotation with ordered wall kicks
//!
//! A rotation first tries the rotated matrix in place. If it collides, the
//! offsets in [`WALL_KICKS`] are tried in order and the first one that fits is
//! applied together with the rotation. If none fits, nothing changes.

use crate::board::Board;
use crate::collision::collides;
use crate::tetromino::Tetromino;
use crate::types::WALL_KICKS;

/// Try to rotate a piece clockwise with wall kicks.
///
/// Returns `Some((rotated_piece, kick_offset))` on success, `None` if the
/// rotation and every kick collide. The kick offset is `(0, 0)` when the
/// rotation fit in place.
pub fn try_rotate(board: &Board, piece: &Tetromino) -> Option<(Tetromino, (i8, i8))> {
    let rotated = Tetromino {
        matrix: piece.matrix.rotated_cw(),
        ..*piece
    };

    if !collides(board, &rotated, 0, 0) {
        return Some((rotated, (0, 0)));
    }

    WALL_KICKS
        .iter()
        .find(|&&(dx, dy)| !collides(board, &rotated, dx, dy))
        .map(|&(dx, dy)| (rotated.shifted(dx, dy), (dx, dy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_rotation_in_open_space_needs_no_kick() {
        let board = Board::standard();
        let piece = Tetromino::at(PieceKind::T, 4, 5);
        let (rotated, kick) = try_rotate(&board, &piece).unwrap();
        assert_eq!(kick, (0, 0));
        assert_eq!((rotated.x, rotated.y), (4, 5));
        assert_eq!(rotated.matrix, piece.matrix.rotated_cw());
    }

    #[test]
    fn test_vertical_i_against_right_wall_kicks_left() {
        let board = Board::standard();
        // Vertical I in column x + 2 = 9, flush with the right wall.
        let mut piece = Tetromino::at(PieceKind::I, 7, 5);
        piece.matrix = piece.matrix.rotated_cw();
        assert!(!collides(&board, &piece, 0, 0));

        // Rotating back to horizontal at x=7 needs columns 7..=10 (10 is off-board).
        // Left 1 lands on 6..=9, which fits.
        let (rotated, kick) = try_rotate(&board, &piece).unwrap();
        assert_eq!(kick, (-1, 0));
        assert_eq!(rotated.x, 6);
    }

    #[test]
    fn test_rotation_fully_blocked_returns_none() {
        let mut board = Board::new(4, 4);
        // Leave only row 3 empty: a horizontal I fits, a vertical one never does.
        for y in 0..3 {
            for x in 0..4 {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
        let piece = Tetromino::at(PieceKind::I, 0, 2);
        assert!(!collides(&board, &piece, 0, 0));
        assert!(try_rotate(&board, &piece).is_none());
    }
}
