//! Dispatch records: candidate decisions, in-progress dispatches and the
//! summaries returned to the driver.

use serde::{Deserialize, Serialize};

use super::{Incident, ResponseUnit};

/// Best (center, unit) match found for one incident in one evaluation pass.
///
/// Ephemeral; nothing is committed until the engine turns it into an
/// [`ActiveDispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchDecision {
    /// Chosen center.
    pub center_id: String,
    /// Chosen unit (still in the center's pool).
    pub unit: ResponseUnit,
    /// Shortest-path distance from the center to the incident.
    pub distance: f64,
    /// Severity-biased score; lower wins.
    pub score: f64,
}

/// A unit currently working an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDispatch {
    /// The incident being served.
    pub incident: Incident,
    /// Center the unit left from and returns to.
    pub center_id: String,
    /// The unit on the job.
    pub unit: ResponseUnit,
    /// Travel distance at dispatch time.
    pub distance: f64,
    /// Score at dispatch time.
    pub score: f64,
}

/// One assignment committed by a settle pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned incident.
    pub incident_id: String,
    /// Center the unit was taken from.
    pub center_id: String,
    /// Assigned unit.
    pub unit_id: String,
    /// Shortest-path distance at dispatch time.
    pub distance: f64,
}

impl From<&ActiveDispatch> for Assignment {
    fn from(active: &ActiveDispatch) -> Self {
        Self {
            incident_id: active.incident.id.clone(),
            center_id: active.center_id.clone(),
            unit_id: active.unit.id.clone(),
            distance: active.distance,
        }
    }
}

/// An idle unit moved between centers by pre-positioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repositioning {
    /// Moved unit.
    pub unit_id: String,
    /// Center the unit left.
    pub from_center: String,
    /// Center at the predicted hotspot.
    pub to_center: String,
}
