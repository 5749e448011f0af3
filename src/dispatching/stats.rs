//! Running dispatch statistics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | submitted | incidents accepted by `submit_incident` |
//! | dispatched | assignments committed by settle passes |
//! | completed | dispatches freed by `complete_dispatch` |
//! | repositioned | units moved by pre-positioning |
//! | mean distance | total dispatch distance / dispatched |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ActiveDispatch;

/// Counters maintained by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchStats {
    /// Incidents submitted.
    pub submitted: usize,
    /// Dispatches committed.
    pub dispatched: usize,
    /// Dispatches completed.
    pub completed: usize,
    /// Units moved by pre-positioning.
    pub repositioned: usize,
    /// Sum of dispatch distances.
    pub total_distance: f64,
    /// Dispatches committed per center.
    pub dispatches_by_center: BTreeMap<String, usize>,
}

impl DispatchStats {
    pub(crate) fn record_dispatch(&mut self, dispatch: &ActiveDispatch) {
        self.dispatched += 1;
        self.total_distance += dispatch.distance;
        *self
            .dispatches_by_center
            .entry(dispatch.center_id.clone())
            .or_default() += 1;
    }

    /// Mean travel distance per dispatch (0.0 before the first dispatch).
    pub fn mean_distance(&self) -> f64 {
        if self.dispatched == 0 {
            0.0
        } else {
            self.total_distance / self.dispatched as f64
        }
    }

    /// Dispatches committed but not yet completed.
    pub fn in_progress(&self) -> usize {
        self.dispatched.saturating_sub(self.completed)
    }
}
