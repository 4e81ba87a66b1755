//! Activity model.
//!
//! An activity is a time-bounded item (mission, maintenance, pause,
//! reservation) assigned to exactly one resource. Activities arrive from the
//! planning collaborator as loosely-typed [`ActivityRecord`]s and are
//! validated once into [`Activity`] values.
//!
//! # Time Model
//! All instants are local wall-clock (`NaiveDateTime`). Offsets present in
//! input strings are discarded; the wall-clock reading is kept.
//!
//! # Day Visibility
//! An activity is visible on a calendar date when that date falls within
//! `[start.date(), end.date()]`. This is looser than exact overlap: an
//! activity ending at 00:00 on day D is still "visible" on D, and is then
//! removed by exact clipping (see [`super::ClippedInterval`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Formats tried, in order, for naive timestamps.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A validated activity.
///
/// Invariant: `start < end`. Construction through [`Activity::new`] or
/// [`Activity::from_record`] enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: String,
    /// Owning resource (vehicle) identifier.
    pub resource_id: String,
    /// Start instant (inclusive).
    pub start: NaiveDateTime,
    /// End instant (exclusive).
    pub end: NaiveDateTime,
    /// Category, used for status and labels only.
    pub kind: ActivityKind,
    /// Explicit display label.
    pub label: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Assigned driver, used for label resolution.
    pub driver_id: Option<String>,
}

impl Activity {
    /// Creates a mission activity.
    ///
    /// # Errors
    /// Returns [`TimelineError::EmptyInterval`] when `start >= end`.
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let id = id.into();
        if start >= end {
            return Err(TimelineError::EmptyInterval {
                activity_id: id,
                start,
                end,
            });
        }
        Ok(Self {
            id,
            resource_id: resource_id.into(),
            start,
            end,
            kind: ActivityKind::Mission,
            label: None,
            description: None,
            driver_id: None,
        })
    }

    /// Validates a raw record.
    ///
    /// # Errors
    /// - [`TimelineError::InvalidTimestamp`] if either bound fails to parse.
    /// - [`TimelineError::EmptyInterval`] if the bounds are not ordered.
    pub fn from_record(record: &ActivityRecord) -> Result<Self> {
        let start = parse_bound(&record.id, &record.start)?;
        let end = parse_bound(&record.id, &record.end)?;

        let mut activity = Self::new(&record.id, &record.resource_id, start, end)?;
        activity.kind = ActivityKind::from(record.kind.as_str());
        activity.label = record.label.clone();
        activity.description = record.description.clone();
        activity.driver_id = record.driver_id.clone();
        Ok(activity)
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assigned driver.
    pub fn with_driver(mut self, driver_id: impl Into<String>) -> Self {
        self.driver_id = Some(driver_id.into());
        self
    }

    /// Whether the activity touches `date` by calendar day.
    pub fn is_visible_on(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// Whether `now` lies within `[start, end]`.
    pub fn is_in_progress(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// Label shown on the timeline block.
    ///
    /// Prefers the driver's name, then the explicit label, then the kind.
    pub fn display_label(&self, driver_name: Option<&str>) -> String {
        match (driver_name, &self.label) {
            (Some(name), _) if !name.trim().is_empty() => name.to_string(),
            (_, Some(label)) if !label.trim().is_empty() => label.clone(),
            _ => self.kind.label().to_string(),
        }
    }
}

/// Activity category.
///
/// Parsed leniently from the planning collaborator's `type` strings;
/// unrecognised values are kept as [`ActivityKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    /// Driving mission or booking.
    Mission,
    /// Vehicle in the workshop.
    Maintenance,
    /// Scheduled break.
    Pause,
    /// Explicit availability slot.
    Available,
    /// Held for a requester, not yet a mission.
    Reserved,
    /// Domain-specific kind.
    Other(String),
}

impl ActivityKind {
    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Mission => "Mission",
            Self::Maintenance => "Maintenance",
            Self::Pause => "Pause",
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Other(name) => name,
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mission => "mission",
            Self::Maintenance => "maintenance",
            Self::Pause => "pause",
            Self::Available => "disponible",
            Self::Reserved => "reserve",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mission" | "booking" => Self::Mission,
            "maintenance" => Self::Maintenance,
            "pause" => Self::Pause,
            "disponible" | "available" => Self::Available,
            "reserve" | "reserved" => Self::Reserved,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl From<String> for ActivityKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Visual status class of an activity at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Maintenance block.
    Maintenance,
    /// Pause block.
    Pause,
    /// Currently running.
    InProgress,
    /// Any other scheduled item.
    Planned,
}

impl ActivityStatus {
    /// Classifies an activity. Kind wins over timing.
    pub fn classify(activity: &Activity, now: NaiveDateTime) -> Self {
        match Self::of_kind(&activity.kind) {
            Self::Planned if activity.is_in_progress(now) => Self::InProgress,
            status => status,
        }
    }

    /// Status from the kind alone, without a reference instant.
    pub fn of_kind(kind: &ActivityKind) -> Self {
        match kind {
            ActivityKind::Maintenance => Self::Maintenance,
            ActivityKind::Pause => Self::Pause,
            _ => Self::Planned,
        }
    }
}

/// Raw activity as supplied by the scheduling collaborator.
///
/// Field aliases accept the planning API's names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    #[serde(alias = "vehiculeId", alias = "vehicule_id")]
    pub resource_id: String,
    #[serde(alias = "dateDebut", alias = "date_debut")]
    pub start: String,
    #[serde(alias = "dateFin", alias = "date_fin")]
    pub end: String,
    #[serde(default = "default_kind", alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "conducteurId", alias = "conducteur_id")]
    pub driver_id: Option<String>,
}

fn default_kind() -> String {
    "mission".to_string()
}

impl ActivityRecord {
    /// Creates a mission record.
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            resource_id: resource_id.into(),
            start: start.into(),
            end: end.into(),
            kind: default_kind(),
            ..Default::default()
        }
    }

    /// Sets the kind string.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Parses an ISO-8601 timestamp as local wall-clock time.
///
/// Accepts naive date-times (with `T` or space, optional seconds and
/// fraction), RFC 3339 with an offset (offset discarded), and bare dates
/// (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_bound(activity_id: &str, value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| TimelineError::InvalidTimestamp {
        activity_id: activity_id.to_string(),
        value: value.to_string(),
    })
}
