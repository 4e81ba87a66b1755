//! Resource model.
//!
//! Resources are the entities whose timelines are rendered as rows:
//! vehicles in the fleet. The engine reads only the identifier; labels are
//! carried through to the row output for the rendering surface.

use serde::{Deserialize, Serialize};

/// A resource (vehicle) owning one timeline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Primary label (registration plate).
    #[serde(default, alias = "immatriculation")]
    pub display_label: String,
    /// Secondary label (make and model).
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Resource {
    /// Creates a resource labelled with its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_label: id.clone(),
            id,
            subtitle: None,
        }
    }

    /// Sets the primary label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = label.into();
        self
    }

    /// Sets the secondary label.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}
