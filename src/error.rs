//! Error types for ingestion and configuration.
//!
//! The layout itself is total and never fails. Only the boundaries that
//! turn loose input into typed values can reject something.

/// Result alias for fallible timeline operations.
pub type Result<T, E = TimelineError> = std::result::Result<T, E>;

/// Errors raised at the ingestion and configuration boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// A start or end timestamp could not be parsed.
    #[error("Invalid timestamp for activity '{activity_id}': '{value}'")]
    InvalidTimestamp { activity_id: String, value: String },

    /// The activity ends at or before it starts.
    #[error("Empty interval for activity '{activity_id}': start {start} is not before end {end}")]
    EmptyInterval {
        activity_id: String,
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl TimelineError {
    /// Identifier of the activity involved, if any.
    pub fn activity_id(&self) -> Option<&str> {
        match self {
            Self::InvalidTimestamp { activity_id, .. } | Self::EmptyInterval { activity_id, .. } => {
                Some(activity_id)
            }
            _ => None,
        }
    }
}
