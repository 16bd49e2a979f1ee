//! Scoring module - line clear points, drop bonuses, levels and gravity
//!
//! - Line clears award `LINE_SCORES[n] * level`, using the level in effect when
//!   the piece locked (before the new lines are counted).
//! - Level is `total_lines / 10 + 1`.
//! - Gravity interval is `max(min, initial - (level - 1) * step)`.
//! - Soft drop awards 1 point per cell, hard drop 2; gravity awards nothing.

use crate::config::GravityConfig;
use crate::types::{HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS};

/// Result of scoring one lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for the cleared lines
    pub points: u32,
    /// Total lines after this event
    pub total_lines: u32,
    /// Level after this event
    pub level: u32,
    pub level_up: bool,
}

/// Calculate line clear score
/// lines: number of lines cleared (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map(|base| base.saturating_mul(level))
        .unwrap_or(0)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds), clamped at the floor
pub fn drop_interval_ms(level: u32, gravity: &GravityConfig) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(gravity.step_ms);
    gravity
        .initial_ms
        .saturating_sub(reduction)
        .max(gravity.min_ms)
}

/// Score one lock event that cleared `lines` rows.
pub fn calculate_score(lines: usize, level: u32, total_lines_before: u32) -> ScoreResult {
    let points = calculate_line_score(lines, level);
    let total_lines = total_lines_before.saturating_add(lines as u32);
    let new_level = calculate_level(total_lines);

    ScoreResult {
        points,
        total_lines,
        level: new_level,
        level_up: new_level > level,
    }
}
