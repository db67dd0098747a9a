//! Collision module - placement validation
//!
//! Pure functions: nothing here mutates the piece or the lock table, so the session can
//! call them speculatively after every tentative move.

use crate::lock_table::LockTable;
use crate::piece::Piece;
use crate::shapes::PieceShape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Absolute (column, row) of every mino of the piece
pub fn occupied_cells(piece: &Piece) -> PieceShape {
    piece.shape().map(|(dx, dy)| (piece.x + dx, piece.y + dy))
}

/// Check whether a single absolute cell may hold a mino.
///
/// Columns are checked first so a piece can never hang over a wall, even above the grid.
/// Rows above the grid are otherwise free.
pub fn is_cell_free(x: i8, y: i8, table: &LockTable) -> bool {
    if x < 0 || x >= BOARD_WIDTH as i8 {
        return false;
    }
    if y < 0 {
        return true;
    }
    if y >= BOARD_HEIGHT as i8 {
        return false;
    }
    !table.is_occupied(x, y)
}

/// True only if every mino of the piece is on a free cell
pub fn is_valid_placement(piece: &Piece, table: &LockTable) -> bool {
    occupied_cells(piece)
        .iter()
        .all(|&(x, y)| is_cell_free(x, y, table))
}

/// Whether a gravity step from the current position would be accepted
pub fn can_move_down(piece: &Piece, table: &LockTable) -> bool {
    let mut below = *piece;
    below.move_down();
    is_valid_placement(&below, table)
}
