//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the simulation of the falling-block game: the shape catalog,
//! collision rules, the lock table with line clearing, scoring and the session state
//! machine. It does no I/O; rendering and keyboard handling live in sibling crates.
//!
//! - **Deterministic**: the same seed and the same tick/action stream replay identically
//! - **Explicit state**: every validation receives the lock table it checks against
//! - **Allocation-light**: collision checks and line clears never allocate
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven kinds and their rotation masks
//! - [`piece`]: the movable piece instance
//! - [`collision`]: placement validation
//! - [`lock_table`]: settled cells, line clearing
//! - [`scoring`]: points per lock event
//! - [`rng`]: uniform piece draws and the lookahead queue
//! - [`grid`]: color projection for renderers
//! - [`game_state`]: the session (timer, lock transition, loss detection)
//! - [`snapshot`]: per-frame view handed to renderers
//!
//! # Game Rules
//!
//! - The playfield is 10x20; pieces spawn at anchor (5, 0), fully above the visible rows
//! - Gravity moves the piece one row once the fall timer exceeds 270ms
//! - A rejected gravity step locks the piece; full rows are removed and the stack compacts
//! - 1/2/3/4 rows cleared by one lock award 100/300/500/800 points
//! - A lock that leaves any cell above row 0 ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//! let start = game.active();
//!
//! game.tick(TICK_MS, &[GameAction::MoveRight]);
//! assert_eq!(game.active().x, start.x + 1);
//!
//! // Gravity kicks in once the fall timer passes the threshold.
//! let outcome = game.tick(300, &[]);
//! assert!(outcome.gravity_step);
//! assert_eq!(game.active().y, start.y + 1);
//! ```

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod lock_table;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{can_move_down, is_valid_placement, occupied_cells};
pub use game_state::{GameState, SessionConfig, TickOutcome};
pub use grid::Grid;
pub use lock_table::LockTable;
pub use piece::Piece;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::line_clear_score;
pub use shapes::PieceShape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
