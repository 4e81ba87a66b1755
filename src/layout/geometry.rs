//! Geometry mapping.
//!
//! Converts a clipped interval and its lane into normalized coordinates.
//! Horizontal values are fractions of the day window; vertical values are
//! pixels from the top of the resource row.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::models::{ClippedInterval, DayWindow};

/// Normalized geometry of one activity block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Source activity identifier.
    pub activity_id: String,
    /// Lane the block sits in.
    pub lane: usize,
    /// Horizontal offset as a fraction of the day, in `[0, 1)`.
    pub left: f64,
    /// Width as a fraction of the day, in `(0, 1]`.
    pub width: f64,
    /// Vertical offset from the row top (px).
    pub top: f64,
    /// Block height (px); identical for every block.
    pub height: f64,
}

impl LayoutRecord {
    /// Right edge as a fraction of the day.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Maps an interval in `lane` to layout coordinates.
pub fn to_layout(
    interval: &ClippedInterval,
    lane: usize,
    window: &DayWindow,
    config: &LayoutConfig,
) -> LayoutRecord {
    let day = window.duration_ms() as f64;
    let start = window.offset_ms(interval.start) as f64;
    let end = window.offset_ms(interval.end) as f64;

    LayoutRecord {
        activity_id: interval.activity_id.clone(),
        lane,
        left: start / day,
        width: (end - start) / day,
        top: lane_top(lane, config),
        height: config.item_height,
    }
}

/// Vertical offset of a lane (px).
#[inline]
pub fn lane_top(lane: usize, config: &LayoutConfig) -> f64 {
    lane as f64 * config.row_pixel_unit + config.lane_margin
}
