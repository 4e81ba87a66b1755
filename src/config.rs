//! Layout configuration.
//!
//! Pixel constants for the vertical axis and the live cursor tick period.
//! The horizontal axis is always normalized to the day and needs no
//! configuration.
//!
//! # Defaults
//!
//! | Option | Default | Meaning |
//! |--------|---------|---------|
//! | `row_pixel_unit` | 65 | Vertical pitch of one lane (px) |
//! | `minimum_row_height` | 90 | Smallest row height (px) |
//! | `vertical_padding` | 20 | Extra row height below the lanes (px) |
//! | `lane_margin` | 8 | Offset of lane 0 from the row top (px) |
//! | `item_height` | 45 | Height of every activity block (px) |
//! | `tick_interval_ms` | 1000 | Live cursor recompute period (ms) |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, TimelineError};

/// Vertical layout constants and cursor tick period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical pitch of one lane (px).
    pub row_pixel_unit: f64,
    /// Smallest row height (px).
    pub minimum_row_height: f64,
    /// Extra row height below the lanes (px).
    pub vertical_padding: f64,
    /// Offset of lane 0 from the row top (px).
    pub lane_margin: f64,
    /// Height of every activity block (px).
    pub item_height: f64,
    /// Live cursor recompute period (ms).
    pub tick_interval_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_pixel_unit: 65.0,
            minimum_row_height: 90.0,
            vertical_padding: 20.0,
            lane_margin: 8.0,
            item_height: 45.0,
            tick_interval_ms: 1000,
        }
    }
}

impl LayoutConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns [`TimelineError::ConfigParse`] for malformed TOML and
    /// [`TimelineError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the lane pitch.
    pub fn with_row_pixel_unit(mut self, px: f64) -> Self {
        self.row_pixel_unit = px;
        self
    }

    /// Sets the minimum row height.
    pub fn with_minimum_row_height(mut self, px: f64) -> Self {
        self.minimum_row_height = px;
        self
    }

    /// Sets the vertical padding.
    pub fn with_vertical_padding(mut self, px: f64) -> Self {
        self.vertical_padding = px;
        self
    }

    /// Sets the lane margin.
    pub fn with_lane_margin(mut self, px: f64) -> Self {
        self.lane_margin = px;
        self
    }

    /// Sets the block height.
    pub fn with_item_height(mut self, px: f64) -> Self {
        self.item_height = px;
        self
    }

    /// Sets the cursor tick period.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Cursor tick period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let pixels = [
            ("minimum_row_height", self.minimum_row_height),
            ("vertical_padding", self.vertical_padding),
            ("lane_margin", self.lane_margin),
            ("item_height", self.item_height),
        ];
        for (field, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig {
                    field,
                    reason: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        if !self.row_pixel_unit.is_finite() || self.row_pixel_unit <= 0.0 {
            return Err(TimelineError::InvalidConfig {
                field: "row_pixel_unit",
                reason: format!("must be a finite positive number, got {}", self.row_pixel_unit),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(TimelineError::InvalidConfig {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
