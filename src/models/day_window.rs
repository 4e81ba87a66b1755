//! Day window model.
//!
//! A day window is the clipping boundary of one local calendar day.
//!
//! # Time Model
//! The window is half-open: `[00:00 of date, 00:00 of date + 1)`. The last
//! covered instant is 23:59:59.999 at millisecond resolution, and the
//! duration is exactly 86 400 000 ms, so a clipped interval filling the
//! day maps to a width of exactly `1.0`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// The `[begin, end)` boundary of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Calendar date this window covers.
    pub date: NaiveDate,
    /// Midnight at the start of `date` (inclusive).
    pub begin: NaiveDateTime,
    /// Midnight at the start of the following day (exclusive).
    pub end: NaiveDateTime,
}

impl DayWindow {
    /// Creates the window for a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        let begin = date.and_time(NaiveTime::MIN);
        Self {
            date,
            begin,
            end: begin + Duration::days(1),
        }
    }

    /// Window containing the given instant.
    pub fn containing(instant: NaiveDateTime) -> Self {
        Self::for_date(instant.date())
    }

    /// Last millisecond covered (23:59:59.999).
    pub fn last_instant(&self) -> NaiveDateTime {
        self.end - Duration::milliseconds(1)
    }

    /// Duration of the window (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.begin).num_milliseconds()
    }

    /// Milliseconds from `begin` to `instant` (negative before the window).
    #[inline]
    pub fn offset_ms(&self, instant: NaiveDateTime) -> i64 {
        (instant - self.begin).num_milliseconds()
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.begin && instant < self.end
    }

    /// Whether `[start, end)` intersects this window.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && self.begin < end
    }

    /// Clamps `[start, end)` into the window.
    ///
    /// Returns `None` when nothing of the range remains.
    pub fn clip(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let clipped_start = start.max(self.begin);
        let clipped_end = end.min(self.end);
        (clipped_start < clipped_end).then_some((clipped_start, clipped_end))
    }
}
