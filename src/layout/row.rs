//! Row height resolution.

use crate::config::LayoutConfig;

/// Pixel height of a resource row holding `lane_count` lanes.
///
/// `max(lane_count * row_pixel_unit + vertical_padding, minimum_row_height)`
pub fn resolve_row_height(lane_count: usize, config: &LayoutConfig) -> f64 {
    let stacked = lane_count as f64 * config.row_pixel_unit + config.vertical_padding;
    stacked.max(config.minimum_row_height)
}
