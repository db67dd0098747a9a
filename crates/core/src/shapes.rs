//! Shapes module - the static catalog of the seven piece kinds
//!
//! Every rotation state is a 5x5 mask stored as a `u32` bitmask (bit `row * 5 + col`).
//! The masks are parsed from string art at compile time, so lookups never scan strings.
//! Rotation indices are taken modulo the kind's state count, so callers may pass any value.

use crate::types::PieceKind;

/// Offset of a single mino relative to the piece anchor (column, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece anchor
pub type PieceShape = [MinoOffset; 4];

/// Side length of a rotation mask.
pub const MASK_SIZE: usize = 5;

/// Amount subtracted from a mask cell's (column, row) to make it relative to the anchor.
pub const ORIGIN_OFFSET: (i8, i8) = (2, 4);

const fn parse_mask(rows: [&str; MASK_SIZE]) -> u32 {
    let mut bits = 0u32;
    let mut r = 0;
    while r < MASK_SIZE {
        let line = rows[r].as_bytes();
        let mut c = 0;
        while c < MASK_SIZE {
            if line[c] == b'0' {
                bits |= 1u32 << (r * MASK_SIZE + c) as u32;
            }
            c += 1;
        }
        r += 1;
    }
    bits
}

const S_STATES: [u32; 2] = [
    parse_mask([".....", ".....", "..00.", ".00..", "....."]),
    parse_mask([".....", "..0..", "..00.", "...0.", "....."]),
];

const Z_STATES: [u32; 2] = [
    parse_mask([".....", ".....", ".00..", "..00.", "....."]),
    parse_mask([".....", "..0..", ".00..", ".0...", "....."]),
];

const I_STATES: [u32; 2] = [
    parse_mask(["..0..", "..0..", "..0..", "..0..", "....."]),
    parse_mask([".....", "0000.", ".....", ".....", "....."]),
];

const O_STATES: [u32; 1] = [parse_mask([".....", ".....", ".00..", ".00..", "....."])];

const J_STATES: [u32; 4] = [
    parse_mask([".....", ".0...", ".000.", ".....", "....."]),
    parse_mask([".....", "..00.", "..0..", "..0..", "....."]),
    parse_mask([".....", ".....", ".000.", "...0.", "....."]),
    parse_mask([".....", "..0..", "..0..", ".00..", "....."]),
];

const L_STATES: [u32; 4] = [
    parse_mask([".....", "...0.", ".000.", ".....", "....."]),
    parse_mask([".....", "..0..", "..0..", "..00.", "....."]),
    parse_mask([".....", ".....", ".000.", ".0...", "....."]),
    parse_mask([".....", ".00..", "..0..", "..0..", "....."]),
];

const T_STATES: [u32; 4] = [
    parse_mask([".....", "..0..", ".000.", ".....", "....."]),
    parse_mask([".....", "..0..", "..00.", "..0..", "....."]),
    parse_mask([".....", ".....", ".000.", "..0..", "....."]),
    parse_mask([".....", "..0..", ".00..", "..0..", "....."]),
];

/// All rotation masks of a kind, in clockwise order.
pub fn states(kind: PieceKind) -> &'static [u32] {
    match kind {
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::T => &T_STATES,
    }
}

/// Number of distinct rotation states (1, 2 or 4).
pub fn rotation_count(kind: PieceKind) -> usize {
    states(kind).len()
}

/// Raw bitmask of a rotation state.
pub fn mask(kind: PieceKind, rotation: usize) -> u32 {
    let states = states(kind);
    states[rotation % states.len()]
}

/// Mask as a boolean matrix, indexed `[row][col]`.
pub fn mask_rows(kind: PieceKind, rotation: usize) -> [[bool; MASK_SIZE]; MASK_SIZE] {
    let bits = mask(kind, rotation);
    let mut rows = [[false; MASK_SIZE]; MASK_SIZE];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, filled) in row.iter_mut().enumerate() {
            *filled = bits & (1 << (r * MASK_SIZE + c)) != 0;
        }
    }
    rows
}

/// Get the mino offsets for a kind and rotation, relative to the piece anchor.
///
/// Cells come out in row-major mask order.
pub fn cells(kind: PieceKind, rotation: usize) -> PieceShape {
    let bits = mask(kind, rotation);
    let mut shape = [(0, 0); 4];
    let mut n = 0;
    for idx in 0..MASK_SIZE * MASK_SIZE {
        if bits & (1 << idx) == 0 {
            continue;
        }
        let col = (idx % MASK_SIZE) as i8 - ORIGIN_OFFSET.0;
        let row = (idx / MASK_SIZE) as i8 - ORIGIN_OFFSET.1;
        shape[n] = (col, row);
        n += 1;
    }
    debug_assert_eq!(n, 4, "{:?} rotation {} is not a tetromino", kind, rotation);
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_cells() {
        for kind in PieceKind::ALL {
            for &bits in states(kind) {
                assert_eq!(bits.count_ones(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn rotation_counts_follow_symmetry() {
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::I), 2);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::L), 4);
        assert_eq!(rotation_count(PieceKind::T), 4);
    }

    #[test]
    fn parse_mask_sets_row_major_bits() {
        let bits = parse_mask(["0....", ".....", ".....", ".....", "....0"]);
        assert_eq!(bits, 1 | 1 << 24);
    }

    #[test]
    fn cells_apply_origin_offset() {
        // '..00.' on row 2 and '.00..' on row 3
        assert_eq!(
            cells(PieceKind::S, 0),
            [(0, -2), (1, -2), (-1, -1), (0, -1)]
        );
        // vertical bar in column 2, rows 0-3
        assert_eq!(
            cells(PieceKind::I, 0),
            [(0, -4), (0, -3), (0, -2), (0, -1)]
        );
        assert_eq!(
            cells(PieceKind::I, 1),
            [(-2, -3), (-1, -3), (0, -3), (1, -3)]
        );
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(cells(PieceKind::T, 4), cells(PieceKind::T, 0));
        assert_eq!(cells(PieceKind::O, 3), cells(PieceKind::O, 0));
        assert_eq!(cells(PieceKind::Z, 3), cells(PieceKind::Z, 1));
    }

    #[test]
    fn mask_rows_match_bitmask() {
        let rows = mask_rows(PieceKind::T, 0);
        assert!(rows[1][2]);
        assert!(rows[2][1] && rows[2][2] && rows[2][3]);
        assert_eq!(rows.iter().flatten().filter(|&&f| f).count(), 4);
    }
}
