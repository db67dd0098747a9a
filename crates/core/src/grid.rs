//! Grid module - the color projection handed to renderers
//!
//! A grid is rebuilt from the lock table plus the active piece whenever a frame needs it.
//! It is never fed back into the simulation.

use crate::collision::occupied_cells;
use crate::lock_table::LockTable;
use crate::piece::Piece;
use crate::types::{Rgb, BACKGROUND, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major color matrix, `rows[y][x]`
pub type GridRows = [[Rgb; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: GridRows,
}

impl Grid {
    /// An all-background grid
    pub fn empty() -> Self {
        Self {
            rows: [[BACKGROUND; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    /// Locked cells, then the active piece's visible cells on top
    pub fn project(table: &LockTable, active: Option<&Piece>) -> Self {
        let mut grid = Self::empty();
        for ((x, y), color) in table.iter() {
            grid.paint(x, y, color);
        }
        if let Some(piece) = active {
            for (x, y) in occupied_cells(piece) {
                grid.paint(x, y, piece.color());
            }
        }
        grid
    }

    fn paint(&mut self, x: i8, y: i8, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = color;
        }
    }

    /// Color at (x, y), None outside the playfield
    pub fn get(&self, x: i8, y: i8) -> Option<Rgb> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    pub fn rows(&self) -> &GridRows {
        &self.rows
    }

    pub fn is_background(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(BACKGROUND)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
