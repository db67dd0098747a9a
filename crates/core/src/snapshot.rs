use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{GameStatus, PieceKind, MAX_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Playfield colors with the active piece already overlaid
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next_queue: ArrayVec<PieceKind, MAX_QUEUE_LEN>,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub paused: bool,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.status.is_terminated()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::empty(),
            active: None,
            next_queue: ArrayVec::new(),
            score: 0,
            lines: 0,
            pieces: 0,
            paused: false,
            status: GameStatus::Running,
        }
    }
}
