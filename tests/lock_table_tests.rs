//! Lock table tests - settled cells and row clearing

use blockfall::core::LockTable;
use blockfall::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const RED: Rgb = Rgb::new(255, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

#[test]
fn test_new_table_is_empty() {
    let table = LockTable::new();
    assert!(table.is_empty());
    assert_eq!(table.width(), BOARD_WIDTH);
    assert_eq!(table.height(), BOARD_HEIGHT);
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(table.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_out_of_bounds_access() {
    let mut table = LockTable::new();
    assert_eq!(table.get(-1, 0), None);
    assert_eq!(table.get(0, BOARD_HEIGHT as i8), None);
    assert!(!table.set(BOARD_WIDTH as i8, 0, Some(RED)));
    assert!(!table.is_occupied(0, -1));
}

#[test]
fn test_lock_records_color() {
    let mut table = LockTable::new();
    table.lock(&[(0, 19), (1, 19), (1, 18), (2, 18)], BLUE);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(1, 18), Some(Some(BLUE)));
    assert!(!table.is_topped_out());
}

#[test]
fn test_lock_above_grid_spills() {
    let mut table = LockTable::new();
    table.lock(&[(5, -1), (5, 0), (5, 1), (5, 2)], RED);
    assert!(table.is_topped_out());
    assert_eq!(table.spilled(), &[((5, -1), RED)]);
    assert_eq!(table.len(), 4);
}

#[test]
fn test_clear_no_full_rows_is_noop() {
    let mut table = LockTable::from_rows(&["#########.", "#.#.#.#.#."], RED);
    let before = table.clone();
    assert!(table.clear_full_rows().is_empty());
    assert_eq!(table, before);
}

#[test]
fn test_clear_single_row_shifts_above() {
    let mut table = LockTable::from_rows(&["..#.......", "##########"], RED);
    let cleared = table.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(2, 19), Some(Some(RED)));
    assert_eq!(table.get(2, 18), Some(None));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut table = LockTable::from_rows(
        &[
            "#.........",
            "##########",
            ".#........",
            "##########",
            "..#.......",
        ],
        RED,
    );
    let cleared = table.clear_full_rows();
    assert_eq!(cleared.len(), 2);

    // Survivors compact to the bottom in their original order.
    assert_eq!(table.len(), 3);
    assert!(table.is_occupied(2, 19));
    assert!(table.is_occupied(1, 18));
    assert!(table.is_occupied(0, 17));
    assert!(!table.is_occupied(0, 15));
}

#[test]
fn test_clear_four_rows() {
    let full = "##########";
    let mut table = LockTable::from_rows(&[".####.....", full, full, full, full], BLUE);
    assert_eq!(table.clear_full_rows().len(), 4);
    assert_eq!(table.len(), 4);
    for x in 1..5 {
        assert_eq!(table.get(x, 19), Some(Some(BLUE)));
    }
}

#[test]
fn test_clear_leaves_spill_in_place() {
    let mut table = LockTable::from_rows(&["##########"], RED);
    table.lock(&[(3, -2)], BLUE);
    table.clear_full_rows();
    assert_eq!(table.spilled(), &[((3, -2), BLUE)]);
    assert!(table.is_topped_out());
}

#[test]
fn test_iter_reports_visible_and_spilled() {
    let mut table = LockTable::from_rows(&["#........."], RED);
    table.lock(&[(9, -1)], BLUE);
    let mut cells: Vec<_> = table.iter().collect();
    cells.sort_by_key(|&((x, y), _)| (y, x));
    assert_eq!(cells, vec![((9, -1), BLUE), ((0, 19), RED)]);

    table.clear();
    assert!(table.is_empty());
}
