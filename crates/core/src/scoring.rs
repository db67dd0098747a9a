//! Scoring module - fixed line-clear table
//!
//! Points are awarded once per lock event from the number of rows it cleared.
//! There are no drop bonuses and no level multiplier.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with one lock (0 for 0 or anything above 4)
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}
