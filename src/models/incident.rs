//! Incident and dispatch center models.

use serde::{Deserialize, Serialize};

use super::Severity;

/// An emergency reported at a network location.
///
/// Immutable once created. An incident leaves the queue when it turns
/// into an [`ActiveDispatch`](super::ActiveDispatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique incident identifier (e.g., "INC7").
    pub id: String,
    /// Graph node where the incident happened.
    pub location: String,
    /// Severity, which selects queue priority, unit type and score bias.
    pub severity: Severity,
}

impl Incident {
    /// Creates an incident.
    pub fn new(id: impl Into<String>, location: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            severity,
        }
    }
}

/// A dispatch center stationed at a network location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCenter {
    /// Unique center identifier.
    pub id: String,
    /// Graph node of the center.
    pub location: String,
}

impl DispatchCenter {
    /// Creates a center.
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}
