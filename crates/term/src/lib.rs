//! Terminal presentation for the game.
//!
//! Renders [`blockfall_core::GameSnapshot`]s into a character framebuffer and flushes
//! only the changed runs to the terminal. Nothing here feeds back into the simulation.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot -> framebuffer (pure, unit-tested)
//! - [`renderer`]: framebuffer -> terminal escape sequences

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
