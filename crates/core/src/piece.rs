//! Piece module - the falling piece instance
//!
//! Movement and rotation here are optimistic: they always succeed on the piece itself.
//! [`GameState`](crate::GameState) validates each step against the lock table and applies
//! the exact inverse when the result does not fit.

use crate::shapes::{self, PieceShape};
use crate::types::{PieceKind, Rgb, SPAWN_POSITION};

/// Active (or queued) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Anchor column
    pub x: i8,
    /// Anchor row, negative while above the visible grid
    pub y: i8,
    /// Always in `0..rotation_count()`
    pub rotation: u8,
}

impl Piece {
    /// Create a new piece at the spawn anchor with rotation 0
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// Create a piece at an arbitrary anchor with rotation 0
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    pub fn rotation_count(&self) -> u8 {
        shapes::rotation_count(self.kind) as u8
    }

    /// Mino offsets for the current rotation, relative to the anchor
    pub fn shape(&self) -> PieceShape {
        shapes::cells(self.kind, self.rotation as usize)
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    pub fn move_up(&mut self) {
        self.y -= 1;
    }

    pub fn rotate_cw(&mut self) {
        self.rotate_by(1);
    }

    pub fn rotate_ccw(&mut self) {
        self.rotate_by(-1);
    }

    fn rotate_by(&mut self, delta: i16) {
        let count = i16::from(self.rotation_count());
        self.rotation = (i16::from(self.rotation) + delta).rem_euclid(count) as u8;
    }
}
