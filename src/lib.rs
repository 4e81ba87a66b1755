//! Resource timeline layout for fleet planning views.
//!
//! Lays out time-bounded activities (missions, maintenance, pauses) on a
//! 24-hour timeline with one row per resource (vehicle). Overlapping
//! activities are stacked into lanes rather than rejected, activities are
//! clipped to the viewed day, and a live cursor marks the current instant.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `ActivityRecord`, `Resource`,
//!   `DayWindow`, `ClippedInterval`
//! - **`layout`**: Lane assignment, geometry mapping, row heights and the
//!   per-day `TimelineLayout`
//! - **`cursor`**: `LiveCursor`, injectable `Clock`s and the `CursorTicker`
//! - **`config`**: `LayoutConfig` pixel constants and tick period
//! - **`validation`**: Input diagnostics (duplicate IDs, dangling references)
//!
//! # Time Model
//!
//! All instants are local wall-clock `chrono::NaiveDateTime` values. No
//! time-zone conversion is performed.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

pub mod config;
pub mod cursor;
pub mod error;
pub mod layout;
pub mod models;
pub mod validation;

pub use config::LayoutConfig;
pub use error::{Result, TimelineError};
