//! Timeline layout engine.
//!
//! Turns activities and resources into per-row geometry for one viewed day.
//!
//! # Pipeline
//!
//! ```text
//! Activity ──normalize──▶ ClippedInterval ──assign_lanes──▶ lane index
//!                                │                             │
//!                                └──────────to_layout──────────┴──▶ LayoutRecord
//! lane count ──resolve_row_height──▶ row height
//! ```
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use fleet_timeline::layout::{TimelineLayout, TimelineRequest};
//! use fleet_timeline::models::{ActivityRecord, Resource};
//!
//! let records = vec![
//!     ActivityRecord::new("A", "V1", "2024-03-05T08:00", "2024-03-05T10:00"),
//!     ActivityRecord::new("B", "V1", "2024-03-05T09:00", "2024-03-05T11:00"),
//! ];
//! let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let request = TimelineRequest::from_records(vec![Resource::new("V1")], &records, day);
//!
//! let layout = TimelineLayout::compute(&request);
//! assert_eq!(layout.row("V1").unwrap().lane_count, 2);
//! ```

mod geometry;
mod grid;
mod lanes;
mod row;
mod timeline;

pub use geometry::{lane_top, to_layout, LayoutRecord};
pub use grid::{centered_scroll_offset, hour_at, hour_ticks, HourTick, HOURS_PER_DAY};
pub use lanes::{assign_lanes, max_overlap_depth, place, LaneAssignment};
pub use row::resolve_row_height;
pub use timeline::{ResourceRow, TimelineBlock, TimelineLayout, TimelineRequest};
