//! Lock table module - the settled cells of the playfield
//!
//! The visible 10x20 playfield is a flat row-major array for cache locality and zero
//! allocation on the hot path. Cells locked above the visible grid (row < 0) are kept in a
//! separate spill list; any spill means the game is lost.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of visible cells
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one [`LockTable::clear_full_rows`] call, bottom to top.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Settled cell colors, keyed by coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct LockTable {
    /// Flat array of visible cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Cells locked at y < 0
    spill: Vec<((i8, i8), Rgb)>,
}

impl LockTable {
    /// Create a new empty lock table
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            spill: Vec::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get the visible cell at (x, y)
    /// Returns None if out of the visible grid
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a visible cell directly (board setup)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a locked entry exists at (x, y), including spilled entries
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if y < 0 {
            return self.spill.iter().any(|&(pos, _)| pos == (x, y));
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Insert every cell with the given color.
    ///
    /// Cells must not already be occupied; the caller validates placement first.
    pub fn lock(&mut self, cells: &[(i8, i8)], color: Rgb) {
        for &(x, y) in cells {
            debug_assert!(!self.is_occupied(x, y), "lock over occupied cell ({}, {})", x, y);
            if y < 0 {
                self.spill.push(((x, y), color));
            } else {
                let placed = self.set(x, y, Some(color));
                debug_assert!(placed, "lock outside the playfield ({}, {})", x, y);
            }
        }
    }

    /// Any entry above the visible grid (the loss condition)
    pub fn is_topped_out(&self) -> bool {
        !self.spill.is_empty()
    }

    /// Entries locked above the visible grid
    pub fn spilled(&self) -> &[((i8, i8), Rgb)] {
        &self.spill
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top)
    ///
    /// Full rows are dropped and every surviving row moves down by the number of cleared
    /// rows beneath it, in a single bottom-up pass. Spilled entries never move.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Rows vacated at the top by the shift
        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Number of locked entries, spill included
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count() + self.spill.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every locked entry as ((x, y), color), visible cells first in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((i8, i8), Rgb)> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| {
                cell.map(|color| (((idx % width) as i8, (idx / width) as i8), color))
            })
            .chain(self.spill.iter().copied())
    }

    /// Get a reference to the visible cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.spill.clear();
    }

    /// Build from string rows, top to bottom; `.` is empty, anything else is filled.
    ///
    /// Shorter inputs are aligned to the bottom of the playfield. Lines longer than the
    /// board width are truncated.
    pub fn from_rows(rows: &[&str], color: Rgb) -> Self {
        let mut table = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' {
                    table.set(x as i8, y, Some(color));
                }
            }
        }
        table
    }
}

impl Default for LockTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn fill_row(table: &mut LockTable, y: i8, color: Rgb) {
        for x in 0..BOARD_WIDTH as i8 {
            table.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(LockTable::index(0, 0), Some(0));
        assert_eq!(LockTable::index(9, 0), Some(9));
        assert_eq!(LockTable::index(0, 1), Some(10));
        assert_eq!(LockTable::index(9, 19), Some(199));
        assert_eq!(LockTable::index(-1, 0), None);
        assert_eq!(LockTable::index(10, 0), None);
        assert_eq!(LockTable::index(0, 20), None);
        assert_eq!(LockTable::index(0, -1), None);
    }

    #[test]
    fn test_lock_routes_negative_rows_to_spill() {
        let mut table = LockTable::new();
        table.lock(&[(4, -1), (4, 0), (5, 0), (5, 1)], RED);

        assert!(table.is_topped_out());
        assert_eq!(table.spilled(), &[((4, -1), RED)]);
        assert!(table.is_occupied(4, -1));
        assert!(!table.is_occupied(5, -1));
        assert_eq!(table.get(4, 0), Some(Some(RED)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut table = LockTable::new();
        table.set(0, 19, Some(RED));
        table.set(9, 10, Some(BLUE));
        let before = table.clone();

        assert!(table.clear_full_rows().is_empty());
        assert_eq!(table, before);
    }

    #[test]
    fn test_clear_non_adjacent_rows_shifts_by_rows_below() {
        let mut table = LockTable::new();
        fill_row(&mut table, 19, RED);
        fill_row(&mut table, 17, RED);
        table.set(3, 18, Some(BLUE));
        table.set(6, 16, Some(BLUE));

        let cleared = table.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);

        // Row 18 had one cleared row below it, row 16 had two.
        assert_eq!(table.get(3, 19), Some(Some(BLUE)));
        assert_eq!(table.get(6, 18), Some(Some(BLUE)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_clear_leaves_spill_in_place() {
        let mut table = LockTable::new();
        fill_row(&mut table, 19, RED);
        table.lock(&[(0, -1)], BLUE);

        assert_eq!(table.clear_full_rows().len(), 1);
        assert_eq!(table.spilled(), &[((0, -1), BLUE)]);
        assert_eq!(table.get(0, 0), Some(None));
    }

    #[test]
    fn test_iter_reports_coordinates() {
        let mut table = LockTable::new();
        table.set(2, 5, Some(RED));
        table.lock(&[(7, -2)], BLUE);

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![((2, 5), RED), ((7, -2), BLUE)]);
    }

    #[test]
    fn test_from_rows_aligns_to_bottom() {
        let table = LockTable::from_rows(&["#.........", "##########"], RED);
        assert_eq!(table.get(0, 18), Some(Some(RED)));
        assert_eq!(table.get(1, 18), Some(None));
        assert!(table.is_row_full(19));
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut table = LockTable::from_rows(&["##########"], RED);
        table.lock(&[(1, -1)], RED);
        table.clear();
        assert!(table.is_empty());
        assert!(!table.is_topped_out());
    }
}
