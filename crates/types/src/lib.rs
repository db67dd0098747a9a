//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used by the
//! simulation core, the input mapping and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (5, 0), which places every spawn shape above the visible grid
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 270 | Gravity step threshold (fall timer must exceed it) |
//! | `REPEAT_DELAY_MS` | 160 | Hold time before held movement starts repeating |
//! | `MOVE_REPEAT_MS` | 80 | Held left/right repeat delay |
//! | `DOWN_REPEAT_MS` | 25 | Held down repeat delay |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::ALL[6];
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color().r, 255);
//!
//! assert_ne!(GameAction::RotateCw, GameAction::RotateCcw);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity threshold: a step happens once the fall timer exceeds this value.
pub const FALL_INTERVAL_MS: u32 = 270;

/// Hold time before a held movement key starts repeating.
///
/// Longer than the input handler's key-release timeout, so a single tap in a terminal
/// without release events never repeats.
pub const REPEAT_DELAY_MS: u32 = 160;

/// Repeat delay for a held left/right key.
pub const MOVE_REPEAT_MS: u32 = 80;

/// Repeat delay for a held down key.
pub const DOWN_REPEAT_MS: u32 = 25;

/// Default length of the lookahead queue.
pub const DEFAULT_QUEUE_LEN: usize = 5;

/// Upper bound for a configured lookahead queue.
pub const MAX_QUEUE_LEN: usize = 8;

/// Anchor (column, row) of a freshly spawned piece.
pub const SPAWN_POSITION: (i8, i8) = (5, 0);

/// Points per lock event, indexed by the number of rows cleared (0-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of an empty playfield cell.
pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);

/// The seven tetromino kinds
///
/// The declaration order matches the order the shape catalog lists them in, which is also
/// the index used by uniform random selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fixed display color of the kind.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::S => Rgb::new(12, 255, 12),
            PieceKind::Z => Rgb::new(255, 12, 12),
            PieceKind::I => Rgb::new(12, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 12),
            PieceKind::J => Rgb::new(12, 12, 255),
            PieceKind::L => Rgb::new(255, 128, 12),
            PieceKind::T => Rgb::new(255, 12, 255),
        }
    }
}

/// Discrete commands the presentation layer feeds into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (no score bonus)
    MoveDown,
    /// Advance to the next rotation state
    RotateCw,
    /// Step back to the previous rotation state
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// End the session
    Quit,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A piece locked with at least one cell above the visible grid.
    ToppedOut,
    /// The player asked to quit.
    Quit,
}

/// Session state machine: `Running` until it becomes `Terminated`, which is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Terminated(EndReason),
}

impl GameStatus {
    pub fn is_terminated(&self) -> bool {
        matches!(self, GameStatus::Terminated(_))
    }
}

/// A settled playfield cell
///
/// - `None`: empty
/// - `Some(Rgb)`: locked with the color of the piece that filled it
pub type Cell = Option<Rgb>;

/// Summary of a single lock event, kept for observers (side panel, logs, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_delta: u32,
}
