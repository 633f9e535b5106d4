//! Scoring module - line clear points, levels and gravity speed
//!
//! Classic table scaled by the current level, a level every ten lines, and a
//! drop interval table that only ever gets faster.

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, EXTRA_LINE_SCORE, LINES_PER_LEVEL, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared by one lock
/// level: current level (1-based)
///
/// Non-decreasing in `lines`; clears past four (prepared boards only) add
/// [`EXTRA_LINE_SCORE`] per extra line.
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let table = LINE_SCORES[lines.min(4) as usize];
    let extra = lines.saturating_sub(4).saturating_mul(EXTRA_LINE_SCORE);
    table.saturating_add(extra).saturating_mul(level.max(1))
}

/// Level management
/// Level 1 at the start, +1 every ten lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let idx = level.saturating_sub(1) as usize;
    DROP_INTERVALS
        .get(idx)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}
