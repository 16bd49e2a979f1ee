//! Pieces module - the piece catalog and square cell matrices
//!
//! Every piece is a square boolean matrix (2x2, 3x3 or 4x4) stored as a 16-bit mask.
//! The canonical orientation is the spawn orientation; rotations are derived
//! from it by rotating the matrix, so no per-rotation tables exist.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Color, PieceKind};

/// Offset of a single mino inside its matrix, as (column, row)
pub type MinoOffset = (i8, i8);

/// Occupied offsets of a matrix (at most 16 for a 4x4 matrix)
pub type MinoCells = ArrayVec<MinoOffset, 16>;

/// Square boolean matrix of up to 4x4 cells.
///
/// Bit `row * 4 + col` is set when the cell is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: u8,
    bits: u16,
}

impl Matrix {
    pub const MAX_SIZE: u8 = 4;

    /// Build a matrix from rows of 0/1 values; only the top-left `size x size`
    /// block is read.
    pub const fn from_rows(size: u8, rows: [[u8; 4]; 4]) -> Self {
        let mut bits = 0u16;
        let mut r = 0;
        while r < size as usize {
            let mut c = 0;
            while c < size as usize {
                if rows[r][c] != 0 {
                    bits |= 1 << (r * 4 + c);
                }
                c += 1;
            }
            r += 1;
        }
        Self { size, bits }
    }

    /// Empty matrix of the given size (clamped to 4)
    pub fn empty(size: u8) -> Self {
        Self {
            size: size.min(Self::MAX_SIZE),
            bits: 0,
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    fn bit(row: u8, col: u8) -> u16 {
        1 << (row as u16 * 4 + col as u16)
    }

    /// Whether cell (row, col) is occupied; false outside the matrix
    pub fn get(&self, row: u8, col: u8) -> bool {
        row < self.size && col < self.size && self.bits & Self::bit(row, col) != 0
    }

    fn set(&mut self, row: u8, col: u8) {
        if row < self.size && col < self.size {
            self.bits |= Self::bit(row, col);
        }
    }

    /// Rotate 90° clockwise: `rotated[i][j] = original[n - 1 - j][i]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut out = Self::empty(n);
        for i in 0..n {
            for j in 0..n {
                if self.get(n - 1 - j, i) {
                    out.set(i, j);
                }
            }
        }
        out
    }

    /// Occupied cells as (column, row) offsets, row-major order
    pub fn cells(&self) -> MinoCells {
        let mut out = MinoCells::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.get(row, col) {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }

    /// Number of occupied cells
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }
}

const I_MATRIX: Matrix = Matrix::from_rows(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const O_MATRIX: Matrix = Matrix::from_rows(
    2,
    [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const T_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const S_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const Z_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const J_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const L_MATRIX: Matrix = Matrix::from_rows(
    3,
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Catalog entry for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub color: Color,
    pub matrix: Matrix,
}

/// Spawn-orientation matrix of a piece kind
pub fn canonical_matrix(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => I_MATRIX,
        PieceKind::O => O_MATRIX,
        PieceKind::T => T_MATRIX,
        PieceKind::S => S_MATRIX,
        PieceKind::Z => Z_MATRIX,
        PieceKind::J => J_MATRIX,
        PieceKind::L => L_MATRIX,
    }
}

pub fn definition(kind: PieceKind) -> PieceDef {
    PieceDef {
        kind,
        color: kind.color(),
        matrix: canonical_matrix(kind),
    }
}

/// Draw one piece kind uniformly; every draw is independent of the last
pub fn random_piece_type(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}

/// Column of a matrix's left edge when centered on a board of `board_width`
pub fn spawn_x(board_width: u8, matrix: &Matrix) -> i8 {
    (board_width / 2) as i8 - (matrix.size() / 2) as i8
}
