//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the kind of
//! the piece that locked there. Cells live in one flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the top of the visible board.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM};

/// The game board using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given dimensions
    ///
    /// Each side is capped at `MAX_BOARD_DIM` so every cell has an `i8` coordinate.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(MAX_BOARD_DIM);
        let height = height.min(MAX_BOARD_DIM);
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; len],
        }
    }

    /// Create an empty 10x20 board
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x as i16 >= self.width as i16 || y < 0 || y as i16 >= self.height as i16
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Delete row `y` and insert an empty row at the top.
    ///
    /// Rows below `y` are untouched; rows above shift down by one.
    /// Returns false if `y` is out of bounds.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);

        true
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a removal the same row index is checked again, since the row that
    /// shifted into it may be full as well. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Check that every cell can take a mino.
    ///
    /// Cells above the board (y < 0) only need to be inside the side walls.
    pub fn can_lock(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().all(|&(x, y)| {
            if y < 0 {
                x >= 0 && x < self.width as i8
            } else {
                self.is_valid(x, y)
            }
        })
    }

    /// Write a piece's cells (board coordinates) into the grid.
    ///
    /// Cells above the board are dropped. Nothing is written unless every cell
    /// passes [`Board::can_lock`]; returns whether the piece was written.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !self.can_lock(cells) {
            return false;
        }

        for &(x, y) in cells {
            if y >= 0 {
                self.set(x, y, Some(kind));
            }
        }

        true
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows for testing (`.` empty, piece letter filled)
    #[cfg(test)]
    pub fn from_rows(width: u8, rows: &[&str]) -> Self {
        let mut board = Self::new(width, rows.len() as u8);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, y as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
