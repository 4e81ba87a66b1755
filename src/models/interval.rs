//! Clipped intervals.
//!
//! Normalizes a validated [`Activity`] against a [`DayWindow`] into the
//! comparable interval the lane engine and geometry mapper work on.
//!
//! # Stages
//! 1. Day visibility by calendar date (`start.date() <= d <= end.date()`).
//! 2. Exact clipping to `[begin, end)`; empty results are dropped.
//!
//! Both stages run. An activity ending exactly at midnight passes stage 1 for
//! the following day and is removed by stage 2.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Activity, DayWindow};

/// An activity's time range clipped to a day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClippedInterval {
    /// Source activity identifier.
    pub activity_id: String,
    /// Owning resource identifier.
    pub resource_id: String,
    /// Clipped start (inclusive).
    pub start: NaiveDateTime,
    /// Clipped end (exclusive).
    pub end: NaiveDateTime,
}

impl ClippedInterval {
    /// Creates an interval directly. Callers guarantee `start < end`.
    pub fn new(
        activity_id: impl Into<String>,
        resource_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            activity_id: activity_id.into(),
            resource_id: resource_id.into(),
            start,
            end,
        }
    }

    /// Normalizes an activity for a day window.
    ///
    /// Returns `None` if the activity is not visible on the window's date,
    /// or if nothing remains after clipping.
    pub fn normalize(activity: &Activity, window: &DayWindow) -> Option<Self> {
        if activity.start >= activity.end || !activity.is_visible_on(window.date) {
            return None;
        }
        let (start, end) = window.clip(activity.start, activity.end)?;
        Some(Self::new(&activity.id, &activity.resource_id, start, end))
    }

    /// Duration (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    /// Whether two intervals intersect. Touching endpoints do not.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Total time covered by the union of the intervals (ms).
///
/// Overlapping stretches count once.
pub fn covered_duration_ms(intervals: &[ClippedInterval]) -> i64 {
    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> =
        intervals.iter().map(|i| (i.start, i.end)).collect();
    spans.sort();

    let mut total = 0;
    let mut current: Option<(NaiveDateTime, NaiveDateTime)> = None;
    for (start, end) in spans {
        current = match current {
            Some((cs, ce)) if start <= ce => Some((cs, ce.max(end))),
            Some((cs, ce)) => {
                total += (ce - cs).num_milliseconds();
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((cs, ce)) = current {
        total += (ce - cs).num_milliseconds();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn activity(start: NaiveDateTime, end: NaiveDateTime) -> Activity {
        Activity::new("P1", "V1", start, end).unwrap()
    }

    #[test]
    fn test_normalize_inside_day() {
        let w = DayWindow::for_date(day(5));
        let iv = ClippedInterval::normalize(&activity(at(5, 8, 0), at(5, 10, 0)), &w).unwrap();
        assert_eq!(iv.start, at(5, 8, 0));
        assert_eq!(iv.end, at(5, 10, 0));
        assert_eq!(iv.activity_id, "P1");
        assert_eq!(iv.resource_id, "V1");
        assert_eq!(iv.duration_ms(), 2 * 3_600_000);
    }

    #[test]
    fn test_normalize_clips_both_sides() {
        let w = DayWindow::for_date(day(5));
        let iv = ClippedInterval::normalize(&activity(at(4, 23, 0), at(6, 2, 0)), &w).unwrap();
        assert_eq!(iv.start, w.begin);
        assert_eq!(iv.end, w.end);
    }

    #[test]
    fn test_normalize_outside_day() {
        let w = DayWindow::for_date(day(5));
        assert!(ClippedInterval::normalize(&activity(at(3, 8, 0), at(3, 9, 0)), &w).is_none());
        assert!(ClippedInterval::normalize(&activity(at(6, 8, 0), at(6, 9, 0)), &w).is_none());
    }

    #[test]
    fn test_normalize_ends_at_midnight() {
        // Visible on the 5th by date, but nothing left after clipping
        let w = DayWindow::for_date(day(5));
        let act = activity(at(4, 22, 0), at(5, 0, 0));
        assert!(act.is_visible_on(day(5)));
        assert!(ClippedInterval::normalize(&act, &w).is_none());
    }

    #[test]
    fn test_normalize_starts_one_second_before_midnight() {
        let w = DayWindow::for_date(day(6));
        let start = at(5, 23, 59) + Duration::seconds(59);
        let iv = ClippedInterval::normalize(&activity(start, at(6, 0, 0) + Duration::seconds(1)), &w)
            .unwrap();
        assert_eq!(iv.duration_ms(), 1000);
    }

    #[test]
    fn test_normalize_rejects_degenerate() {
        let w = DayWindow::for_date(day(5));
        let mut act = activity(at(5, 8, 0), at(5, 9, 0));
        act.end = act.start;
        assert!(ClippedInterval::normalize(&act, &w).is_none());
        act.end = at(5, 7, 0);
        assert!(ClippedInterval::normalize(&act, &w).is_none());
    }

    #[test]
    fn test_overlaps() {
        let a = ClippedInterval::new("A", "V1", at(5, 8, 0), at(5, 10, 0));
        let b = ClippedInterval::new("B", "V1", at(5, 9, 0), at(5, 11, 0));
        let c = ClippedInterval::new("C", "V1", at(5, 10, 0), at(5, 12, 0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // back-to-back
    }

    #[test]
    fn test_covered_duration() {
        let ivs = vec![
            ClippedInterval::new("A", "V1", at(5, 8, 0), at(5, 10, 0)),
            ClippedInterval::new("B", "V1", at(5, 9, 0), at(5, 11, 0)),
            ClippedInterval::new("C", "V1", at(5, 13, 0), at(5, 14, 0)),
        ];
        // 08-11 (3h) + 13-14 (1h)
        assert_eq!(covered_duration_ms(&ivs), 4 * 3_600_000);
        assert_eq!(covered_duration_ms(&[]), 0);
    }
}
