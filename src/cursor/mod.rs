//! Live "now" cursor.
//!
//! The cursor marks the current instant on the viewed day. It is only shown
//! when the viewed day is today, and it moves on its own timer, independent
//! of the layout.
//!
//! # States
//!
//! | State | Condition | Value |
//! |-------|-----------|-------|
//! | `Hidden` | viewed date ≠ today | none |
//! | `Visible` | viewed date = today | `position ∈ [0, 1)` |
//!
//! `position = (hours * 60 + minutes + seconds / 60) / 1440`
//!
//! With a fixed viewed date the cursor hides at midnight. When the host
//! switches the view to the new day it reappears near 0.

mod clock;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ticker::CursorTicker;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// The cursor's state for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LiveCursor {
    /// The viewed day is not today.
    Hidden,
    /// The viewed day is today.
    Visible {
        /// Elapsed fraction of the day.
        position: f64,
    },
}

impl LiveCursor {
    /// Computes the cursor for `viewed_date` at `now`.
    pub fn compute(viewed_date: NaiveDate, now: NaiveDateTime) -> Self {
        if now.date() != viewed_date {
            return Self::Hidden;
        }
        let minutes = now.hour() as f64 * 60.0 + now.minute() as f64 + now.second() as f64 / 60.0;
        Self::Visible {
            position: minutes / MINUTES_PER_DAY,
        }
    }

    /// Whether the cursor is drawn.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Position when visible.
    pub fn position(&self) -> Option<f64> {
        match self {
            Self::Visible { position } => Some(*position),
            Self::Hidden => None,
        }
    }

    /// Flat shape for the rendering surface.
    pub fn output(&self) -> CursorOutput {
        CursorOutput {
            visible: self.is_visible(),
            position: self.position().unwrap_or(0.0),
        }
    }
}

/// `{visible, position}` as consumed by the rendering surface.
///
/// `position` is `0.0` when hidden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorOutput {
    pub visible: bool,
    pub position: f64,
}

impl From<LiveCursor> for CursorOutput {
    fn from(cursor: LiveCursor) -> Self {
        cursor.output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_hidden_on_other_day() {
        let c = LiveCursor::compute(day(4), at(5, 12, 0, 0));
        assert_eq!(c, LiveCursor::Hidden);
        assert!(!c.is_visible());
        assert_eq!(c.position(), None);
        assert_eq!(c.output(), CursorOutput { visible: false, position: 0.0 });
    }

    #[test]
    fn test_visible_today() {
        let c = LiveCursor::compute(day(5), at(5, 12, 0, 0));
        assert!(c.is_visible());
        assert!((c.position().unwrap() - 0.5).abs() < 1e-12);
        let out: CursorOutput = c.into();
        assert!(out.visible);
    }

    #[test]
    fn test_position_includes_seconds() {
        let c = LiveCursor::compute(day(5), at(5, 6, 30, 30));
        let expected = (6.0 * 60.0 + 30.0 + 0.5) / 1440.0;
        assert!((c.position().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_position_bounds() {
        let start = LiveCursor::compute(day(5), at(5, 0, 0, 0));
        assert_eq!(start.position(), Some(0.0));
        let end = LiveCursor::compute(day(5), at(5, 23, 59, 59));
        assert!(end.position().unwrap() < 1.0);
    }

    #[test]
    fn test_monotonic_until_rollover() {
        let mut now = at(5, 23, 58, 0);
        let mut last = 0.0;
        for _ in 0..119 {
            let p = LiveCursor::compute(day(5), now).position().unwrap();
            assert!(p >= last);
            last = p;
            now += Duration::seconds(1);
        }

        // Past midnight: hidden for the old day, restarting for the new one
        let after = at(6, 0, 0, 1);
        assert_eq!(LiveCursor::compute(day(5), after), LiveCursor::Hidden);
        let restarted = LiveCursor::compute(day(6), after).position().unwrap();
        assert!(restarted < 0.001);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(LiveCursor::Visible { position: 0.25 }).unwrap();
        assert_eq!(json["state"], "visible");
        assert_eq!(json["position"], 0.25);
        let hidden = serde_json::to_value(LiveCursor::Hidden).unwrap();
        assert_eq!(hidden["state"], "hidden");
    }
}
