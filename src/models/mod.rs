//! Timeline domain models.
//!
//! Provides the input types consumed from the planning collaborators and
//! the derived time values the layout is computed from.
//!
//! # Domain Mappings
//!
//! | fleet-timeline | Fleet planning |
//! |----------------|----------------|
//! | Resource | Vehicle |
//! | Activity | Mission / Maintenance / Pause / Reservation |
//! | DayWindow | Selected day in the planning view |
//! | ClippedInterval | Part of an activity drawn on that day |

mod activity;
mod day_window;
mod interval;
mod resource;

pub use activity::{parse_timestamp, Activity, ActivityKind, ActivityRecord, ActivityStatus};
pub use day_window::{DayWindow, DAY_MS};
pub use interval::{covered_duration_ms, ClippedInterval};
pub use resource::Resource;
