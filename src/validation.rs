//! Input diagnostics for timeline data.
//!
//! The layout tolerates bad input by dropping it. These checks let a host
//! surface what was dropped or ambiguous. Detects:
//! - Duplicate resource IDs
//! - Duplicate activity IDs
//! - Activities referencing unknown resources
//! - Records with unparseable or unordered timestamps

use crate::error::TimelineError;
use crate::models::{Activity, ActivityRecord, Resource};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An activity references a resource that doesn't exist.
    InvalidResourceReference,
    /// A timestamp could not be parsed.
    InvalidTimestamp,
    /// An activity does not end after it starts.
    EmptyInterval,
    /// Layout configuration is unusable.
    InvalidConfig,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<TimelineError> for ValidationError {
    fn from(err: TimelineError) -> Self {
        let kind = match err {
            TimelineError::InvalidTimestamp { .. } => ValidationErrorKind::InvalidTimestamp,
            TimelineError::EmptyInterval { .. } => ValidationErrorKind::EmptyInterval,
            TimelineError::InvalidConfig { .. } | TimelineError::ConfigParse(_) => {
                ValidationErrorKind::InvalidConfig
            }
        };
        Self::new(kind, err.to_string())
    }
}

/// Validates resources and validated activities.
///
/// Checks:
/// 1. No duplicate resource IDs
/// 2. No duplicate activity IDs
/// 3. Every activity references an existing resource
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(resources: &[Resource], activities: &[Activity]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    let mut activity_ids = HashSet::new();
    for act in activities {
        if !activity_ids.insert(act.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }
        if !resource_ids.contains(act.resource_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!(
                    "Activity '{}' references unknown resource '{}'",
                    act.id, act.resource_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates raw records, including timestamp parsing.
///
/// Reports every record that would be dropped by ingestion, then runs
/// [`validate_input`] over the ones that survive.
pub fn validate_records(resources: &[Resource], records: &[ActivityRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut activities = Vec::with_capacity(records.len());

    for record in records {
        match Activity::from_record(record) {
            Ok(activity) => activities.push(activity),
            Err(err) => errors.push(ValidationError::from(err)),
        }
    }

    if let Err(mut structural) = validate_input(resources, &activities) {
        errors.append(&mut structural);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
