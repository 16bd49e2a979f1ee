//! Collision resolver
//!
//! A piece collides when any occupied cell, moved by (dx, dy), is outside the
//! side walls, below the floor, or on an occupied board cell. Cells above the
//! board (y < 0) only collide with the side walls, which lets pieces spawn and
//! kick partly above the visible rows.

use crate::board::Board;
use crate::tetromino::Tetromino;

/// Whether `piece` moved by (dx, dy) would overlap the board or leave its bounds
pub fn collides(board: &Board, piece: &Tetromino, dx: i8, dy: i8) -> bool {
    let width = board.width() as i16;
    let height = board.height() as i16;

    piece.matrix.cells().iter().any(|&(c, r)| {
        let x = piece.x as i16 + c as i16 + dx as i16;
        let y = piece.y as i16 + r as i16 + dy as i16;
        x < 0 || x >= width || y >= height || (y >= 0 && board.is_occupied(x as i8, y as i8))
    })
}

/// How many rows `piece` can fall before it would collide
pub fn drop_distance(board: &Board, piece: &Tetromino) -> u8 {
    let mut distance: u8 = 0;
    while distance < board.height() && !collides(board, piece, 0, distance as i8 + 1) {
        distance += 1;
    }
    distance
}
