//! Dispatch decision engine.
//!
//! Owns the road network, the incident queue, the unit pools, the table of
//! active dispatches and the hotspot predictor. All state changes go through
//! its methods.
//!
//! # Incident lifecycle
//!
//! ```text
//! submit_incident ──► Queued ──settle_queue──► Assigned ──complete_dispatch──► Completed
//! ```
//!
//! An incident stays `Queued` for as long as no center can serve it.
//!
//! # Unit conservation
//!
//! Every unit added is, at any time, in exactly one center pool or exactly
//! one active dispatch: `available_count() + active_count() == total_units()`.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::{DispatchPolicy, DispatchStats, HotspotPredictor, IncidentQueue, UnitRegistry};
use crate::error::{require_id, DispatchError, Result};
use crate::graph::{Dijkstra, WeightedGraph};
use crate::models::{
    ActiveDispatch, Assignment, DispatchCenter, DispatchDecision, Incident, Repositioning,
    ResponseUnit, Severity,
};

/// Greedy, severity-first dispatcher.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::DispatchEngine;
/// use u_dispatch::graph::WeightedGraph;
/// use u_dispatch::models::{DispatchCenter, ResponseUnit, Severity};
///
/// let mut graph = WeightedGraph::new();
/// graph.add_edge("A", "B", 3.0).unwrap();
///
/// let mut engine = DispatchEngine::new(graph);
/// engine.add_center(DispatchCenter::new("DC1", "A")).unwrap();
/// engine.add_unit("DC1", ResponseUnit::ambulance("U1")).unwrap();
///
/// let id = engine.submit_incident("B", Severity::Medium).unwrap();
/// let assigned = engine.settle_queue();
/// assert_eq!(assigned[0].unit_id, "U1");
/// assert!(engine.complete_dispatch(&id));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DispatchEngine {
    graph: WeightedGraph,
    policy: DispatchPolicy,
    centers: Vec<DispatchCenter>,
    registry: UnitRegistry,
    queue: IncidentQueue,
    active: BTreeMap<String, ActiveDispatch>,
    predictor: HotspotPredictor,
    stats: DispatchStats,
    next_incident: u64,
    total_units: usize,
}

impl DispatchEngine {
    /// Creates an engine over `graph` with the default policy.
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            graph,
            ..Default::default()
        }
    }

    /// Replaces the dispatch policy.
    ///
    /// # Errors
    /// [`DispatchError::InvalidConfig`] if the policy fails validation.
    pub fn with_policy(mut self, policy: DispatchPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    // ======================== Network ========================

    /// The road network.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// Adds a location to the network. Idempotent.
    pub fn add_location(&mut self, location: &str) -> Result<()> {
        require_id(location, "location")?;
        self.graph.add_node(location);
        Ok(())
    }

    /// Adds an undirected road.
    pub fn add_road(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        self.graph.add_edge(from, to, weight)
    }

    /// Removes a location and every road touching it.
    pub fn remove_location(&mut self, location: &str) -> bool {
        let removed = self.graph.remove_node(location);
        if removed {
            info!(location, "location removed from network");
        }
        removed
    }

    /// Sets a new weight on the road between two distinct locations.
    ///
    /// Returns the number of adjacency entries changed; `0` means there is
    /// no road between them and nothing happened. The next distance query
    /// sees the new weight.
    ///
    /// # Errors
    /// [`DispatchError::SelfLoop`] if both endpoints are equal,
    /// [`DispatchError::InvalidEdgeWeight`] for a non-positive weight.
    pub fn apply_traffic_update(&mut self, a: &str, b: &str, weight: f64) -> Result<usize> {
        require_id(a, "location")?;
        require_id(b, "location")?;
        if a == b {
            return Err(DispatchError::SelfLoop(a.to_string()));
        }
        let updated = self.graph.update_edge_weight(a, b, weight)?;
        info!(from = a, to = b, weight, updated, "traffic update");
        Ok(updated)
    }

    // ======================== Centers and units ========================

    /// Registers a dispatch center.
    ///
    /// # Errors
    /// [`DispatchError::DuplicateCenter`] if the id is taken.
    pub fn add_center(&mut self, center: DispatchCenter) -> Result<()> {
        require_id(&center.id, "center id")?;
        require_id(&center.location, "center location")?;
        if self.center(&center.id).is_some() {
            return Err(DispatchError::DuplicateCenter(center.id));
        }
        if !self.graph.contains(&center.location) {
            warn!(
                center = %center.id,
                location = %center.location,
                "center location is not in the network"
            );
        }
        self.registry.add_center(center.id.clone());
        self.centers.push(center);
        Ok(())
    }

    /// Adds a new unit to the tail of a center's pool.
    ///
    /// # Errors
    /// [`DispatchError::UnknownCenter`] for an unregistered center,
    /// [`DispatchError::DuplicateUnit`] if a unit with this id already exists.
    pub fn add_unit(&mut self, center_id: &str, unit: ResponseUnit) -> Result<()> {
        require_id(&unit.id, "unit id")?;
        if self.center(center_id).is_none() {
            return Err(DispatchError::UnknownCenter(center_id.to_string()));
        }
        if self.unit_exists(&unit.id) {
            return Err(DispatchError::DuplicateUnit(unit.id));
        }
        self.registry.add_unit(center_id, unit)?;
        self.total_units += 1;
        Ok(())
    }

    fn unit_exists(&self, unit_id: &str) -> bool {
        self.registry.locate(unit_id).is_some()
            || self.active.values().any(|a| a.unit.id == unit_id)
    }

    /// Center by id.
    pub fn center(&self, center_id: &str) -> Option<&DispatchCenter> {
        self.centers.iter().find(|c| c.id == center_id)
    }

    /// First registered center stationed at `location`.
    pub fn center_at(&self, location: &str) -> Option<&DispatchCenter> {
        self.centers.iter().find(|c| c.location == location)
    }

    /// Centers in registration order.
    pub fn centers(&self) -> &[DispatchCenter] {
        &self.centers
    }

    /// Units waiting at a center, head of the line first.
    pub fn available_units(&self, center_id: &str) -> impl Iterator<Item = &ResponseUnit> {
        self.registry.available(center_id)
    }

    /// The unit pools.
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    // ======================== Incidents ========================

    /// Queues a new incident and feeds its location to the hotspot predictor.
    ///
    /// Returns the generated incident id (`INC1`, `INC2`, ...).
    pub fn submit_incident(&mut self, location: &str, severity: Severity) -> Result<String> {
        require_id(location, "incident location")?;
        self.next_incident += 1;
        let id = format!("INC{}", self.next_incident);

        self.predictor.record(location);
        self.queue.push(Incident::new(id.clone(), location, severity));
        self.stats.submitted += 1;

        info!(incident = %id, location, %severity, "incident submitted");
        Ok(id)
    }

    /// Best (center, unit) for an incident, without committing anything.
    ///
    /// Every center is tried in registration order. A center is skipped if
    /// it has no unit meeting the severity's requirement or if the incident
    /// is unreachable from it. The lowest score wins; on an exact tie the
    /// earlier center is kept.
    pub fn decide(&self, incident: &Incident) -> Option<DispatchDecision> {
        let requirement = self.policy.required_unit(incident.severity);
        let dijkstra = Dijkstra::new(&self.graph);
        let mut best: Option<DispatchDecision> = None;

        for center in &self.centers {
            let Some(unit) = self.registry.peek_matching(&center.id, requirement) else {
                debug!(center = %center.id, %requirement, "no matching unit");
                continue;
            };

            let distance = dijkstra.distance(&center.location, &incident.location);
            if distance.is_infinite() {
                debug!(center = %center.id, incident = %incident.id, "incident unreachable");
                continue;
            }

            let score = self.policy.score(incident.severity, distance);
            if best.as_ref().map_or(true, |b| score < b.score) {
                best = Some(DispatchDecision {
                    center_id: center.id.clone(),
                    unit: unit.clone(),
                    distance,
                    score,
                });
            }
        }

        best
    }

    /// Assigns queued incidents, highest severity first, until the queue is
    /// empty or its head cannot be served.
    ///
    /// A head incident with no feasible unit blocks everything behind it,
    /// even incidents that could be served; strict severity order is kept
    /// at the cost of possible starvation.
    pub fn settle_queue(&mut self) -> Vec<Assignment> {
        let mut committed = Vec::new();

        while let Some(head) = self.queue.peek() {
            let Some(decision) = self.decide(head) else {
                debug!(
                    incident = %head.id,
                    severity = %head.severity,
                    queued = self.queue.len(),
                    "head incident cannot be served, holding queue"
                );
                break;
            };

            let Some(unit) = self.registry.remove(&decision.center_id, &decision.unit.id) else {
                warn!(
                    center = %decision.center_id,
                    unit = %decision.unit.id,
                    "decided unit missing from pool"
                );
                break;
            };
            let Some(incident) = self.queue.pop() else {
                self.registry.return_unit(&decision.center_id, unit);
                break;
            };

            let dispatch = ActiveDispatch {
                incident,
                center_id: decision.center_id,
                unit,
                distance: decision.distance,
                score: decision.score,
            };
            info!(
                incident = %dispatch.incident.id,
                location = %dispatch.incident.location,
                unit = %dispatch.unit.id,
                unit_type = %dispatch.unit.unit_type,
                center = %dispatch.center_id,
                distance = dispatch.distance,
                score = dispatch.score,
                "dispatched"
            );

            self.stats.record_dispatch(&dispatch);
            committed.push(Assignment::from(&dispatch));
            self.active.insert(dispatch.incident.id.clone(), dispatch);
        }

        committed
    }

    /// Finishes an active dispatch and returns its unit to the tail of the
    /// center it was dispatched from.
    ///
    /// Returns `false` (and does nothing) if the incident is not active.
    pub fn complete_dispatch(&mut self, incident_id: &str) -> bool {
        let Some(done) = self.active.remove(incident_id) else {
            debug!(incident = incident_id, "completion for inactive incident ignored");
            return false;
        };

        info!(
            incident = %done.incident.id,
            unit = %done.unit.id,
            center = %done.center_id,
            "dispatch completed"
        );
        self.registry.return_unit(&done.center_id, done.unit);
        self.stats.completed += 1;
        true
    }

    /// Moves one idle unit toward the predicted hotspot.
    ///
    /// Only acts when the queue is empty, a hotspot has been predicted and a
    /// center sits at that location. Other centers are scanned in
    /// registration order and the head unit of the first non-empty pool is
    /// moved to the tail of the hotspot center's pool. The move is permanent.
    pub fn pre_position_if_idle(&mut self) -> Option<Repositioning> {
        if !self.queue.is_empty() {
            return None;
        }

        let hotspot = self.predictor.predict()?;
        let Some(target) = self.center_at(hotspot) else {
            debug!(hotspot, "no center at hotspot, nothing to pre-position");
            return None;
        };
        let target_id = target.id.clone();
        let hotspot = hotspot.to_string();

        let source_id = self
            .centers
            .iter()
            .filter(|c| c.id != target_id)
            .find(|c| self.registry.pool_len(&c.id) > 0)?
            .id
            .clone();

        let unit = self.registry.pop_front(&source_id)?;
        let moved = Repositioning {
            unit_id: unit.id.clone(),
            from_center: source_id,
            to_center: target_id,
        };
        self.registry.return_unit(&moved.to_center, unit);
        self.stats.repositioned += 1;

        info!(
            unit = %moved.unit_id,
            from = %moved.from_center,
            to = %moved.to_center,
            %hotspot,
            "unit pre-positioned"
        );
        Some(moved)
    }

    // ======================== Inspection ========================

    /// Number of queued incidents.
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    /// Queued incidents in service order.
    pub fn queued_incidents(&self) -> Vec<&Incident> {
        self.queue.ordered()
    }

    /// Number of dispatches in progress.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Active dispatch for an incident.
    pub fn active_dispatch(&self, incident_id: &str) -> Option<&ActiveDispatch> {
        self.active.get(incident_id)
    }

    /// Active dispatches ordered by incident id.
    pub fn active_dispatches(&self) -> impl Iterator<Item = &ActiveDispatch> {
        self.active.values()
    }

    /// Units sitting in center pools.
    pub fn available_count(&self) -> usize {
        self.registry.total_available()
    }

    /// Units ever added.
    pub fn total_units(&self) -> usize {
        self.total_units
    }

    /// Current hotspot prediction.
    pub fn hotspot(&self) -> Option<&str> {
        self.predictor.predict()
    }

    /// The hotspot predictor.
    pub fn predictor(&self) -> &HotspotPredictor {
        &self.predictor
    }

    /// Running statistics.
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// The active dispatch policy.
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }
}
