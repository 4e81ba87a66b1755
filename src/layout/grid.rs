//! Hour grid helpers.
//!
//! The day header shows 24 hour cells. These helpers map between hour cells
//! and the normalized horizontal axis, and compute the scroll offset that
//! brings the live cursor into view.

use serde::{Deserialize, Serialize};

/// Hours in the day grid.
pub const HOURS_PER_DAY: u32 = 24;

/// One hour marker in the grid header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourTick {
    /// Hour of day, `0..=23`.
    pub hour: u32,
    /// Left edge of the cell as a fraction of the day.
    pub left: f64,
    /// Header text, e.g. `"08h"`.
    pub label: String,
}

/// All 24 hour markers.
pub fn hour_ticks() -> Vec<HourTick> {
    (0..HOURS_PER_DAY)
        .map(|hour| HourTick {
            hour,
            left: hour as f64 / HOURS_PER_DAY as f64,
            label: format!("{hour:02}h"),
        })
        .collect()
}

/// Hour cell under a horizontal position (fraction of the day).
///
/// Positions outside `[0, 1)` clamp to the first or last cell.
pub fn hour_at(position: f64) -> u32 {
    let clamped = position.clamp(0.0, 1.0);
    ((clamped * HOURS_PER_DAY as f64).floor() as u32).min(HOURS_PER_DAY - 1)
}

/// Horizontal scroll offset (px) that centers `position` in the viewport.
///
/// `scroll_width` is the full scrollable width including the fixed
/// `sidebar_width` column. Never negative.
pub fn centered_scroll_offset(
    position: f64,
    scroll_width: f64,
    client_width: f64,
    sidebar_width: f64,
) -> f64 {
    let track = (scroll_width - sidebar_width).max(0.0);
    let target = track * position - client_width / 2.0 + sidebar_width;
    target.max(0.0)
}
