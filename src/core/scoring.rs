//! Scoring module - points, levels and gravity speed
//!
//! Multi-row clears pay out more than the sum of singles, level rises with
//! total cleared rows, and the gravity interval shrinks as the level climbs
//! until it hits a floor.

use crate::types::{
    BASE_DROP_MS, DROP_FLOOR_MS, FAST_DROP_MS, LEVEL_STEP_MS, LINES_PER_LEVEL, LINE_POINTS,
};

/// Points for clearing `rows` rows with a single lock
/// More than 4 rows cannot happen and pays nothing
pub fn points_for_rows(rows: usize) -> u32 {
    if rows < LINE_POINTS.len() {
        LINE_POINTS[rows]
    } else {
        0
    }
}

/// Level after `total_lines` cleared rows, starting from `start_level`
pub fn level_for_lines(start_level: u32, total_lines: u32) -> u32 {
    start_level + total_lines / LINES_PER_LEVEL
}

/// Gravity interval in milliseconds for a level.
/// Fast drop overrides the level schedule entirely.
pub fn drop_interval_ms(level: u32, fast_drop: bool) -> u64 {
    if fast_drop {
        return FAST_DROP_MS;
    }
    let steps = level.saturating_sub(1) as u64;
    BASE_DROP_MS
        .saturating_sub(steps * LEVEL_STEP_MS)
        .max(DROP_FLOOR_MS)
}
