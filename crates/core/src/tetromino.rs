//! Active piece - a piece kind, its current matrix and its board origin

use crate::pieces::{canonical_matrix, spawn_x, Matrix, MinoCells};
use crate::types::{Color, PieceKind};

/// A piece placed on the board.
///
/// `(x, y)` is the board position of the matrix's top-left corner. `y` may be
/// negative while part of the matrix is still above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece in canonical orientation, centered at the top of a board
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let matrix = canonical_matrix(kind);
        Self {
            kind,
            matrix,
            x: spawn_x(board_width, &matrix),
            y: 0,
        }
    }

    /// Create a piece in canonical orientation at an explicit origin
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            matrix: canonical_matrix(kind),
            x,
            y,
        }
    }

    /// Occupied cells in board coordinates
    pub fn cells(&self) -> MinoCells {
        self.matrix
            .cells()
            .into_iter()
            .map(|(c, r)| (self.x + c, self.y + r))
            .collect()
    }

    /// Copy moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }
}
