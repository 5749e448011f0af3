//! Structural integrity checks for a road network and a dispatch engine.
//!
//! Detects:
//! - Non-positive or non-finite road weights
//! - Roads whose mirrored entry is missing or carries a different weight
//! - Adjacency entries pointing at nodes that do not exist
//! - Centers stationed off the network
//! - A unit held in two places at once
//! - Units lost or gained outside `add_unit`
//!
//! The engine and graph maintain all of these themselves (a deserialized
//! graph is checked on load); these checks assert the invariants in tests
//! and report every problem at once rather than the first.

use std::collections::{BTreeMap, HashSet};

use crate::dispatching::DispatchEngine;
use crate::graph::{is_valid_weight, WeightedGraph};

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
    /// A road weight is zero, negative, NaN or infinite.
    InvalidWeight,
    /// `u -> v` entries do not mirror `v -> u` entries.
    AsymmetricEdge,
    /// An adjacency entry names a node that is not in the graph.
    DanglingEdge,
    /// A center sits at a location that is not a graph node.
    UnknownCenterLocation,
    /// The same unit id appears more than once across pools and dispatches.
    DuplicateUnit,
    /// Pool sizes plus active dispatches differ from units added.
    UnitCountMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a road network.
///
/// Checks:
/// 1. Every weight is positive and at most `MAX_EDGE_WEIGHT`
/// 2. Every entry points at an existing node
/// 3. For every pair `(u, v)`, the multiset of `u -> v` weights equals the
///    multiset of `v -> u` weights
pub fn validate_network(graph: &WeightedGraph) -> ValidationResult {
    let mut errors = Vec::new();
    let mut weights: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();

    for node in graph.nodes() {
        for edge in graph.neighbors(node) {
            if !is_valid_weight(edge.weight) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWeight,
                    format!("Road {node} -> {} has weight {}", edge.to, edge.weight),
                ));
            }
            if !graph.contains(&edge.to) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingEdge,
                    format!("Road {node} -> {} points at a missing node", edge.to),
                ));
            }
            weights
                .entry((node, edge.to.as_str()))
                .or_default()
                .push(edge.weight);
        }
    }

    for list in weights.values_mut() {
        list.sort_by(f64::total_cmp);
    }

    for (&(from, to), forward) in &weights {
        // self-loops are their own mirror; report each unordered pair once
        if from >= to {
            continue;
        }
        let backward = weights.get(&(to, from));
        let mirrored = backward.is_some_and(|b| {
            b.len() == forward.len()
                && b.iter().zip(forward).all(|(x, y)| x.to_bits() == y.to_bits())
        });
        if !mirrored {
            errors.push(ValidationError::new(
                ValidationErrorKind::AsymmetricEdge,
                format!(
                    "Road {from} -> {to} has weights {forward:?} but {to} -> {from} has {:?}",
                    backward.cloned().unwrap_or_default()
                ),
            ));
        }
    }

    // pairs that only exist in the reverse direction
    for &(from, to) in weights.keys() {
        if from > to && !weights.contains_key(&(to, from)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::AsymmetricEdge,
                format!("Road {from} -> {to} has no mirrored {to} -> {from} entry"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a whole engine: its network plus center and unit bookkeeping.
///
/// Checks:
/// 1. Everything [`validate_network`] checks
/// 2. Every center location is a graph node
/// 3. No unit id appears twice across pools and active dispatches
/// 4. Available plus active units equals units added
pub fn validate_engine(engine: &DispatchEngine) -> ValidationResult {
    let mut errors = match validate_network(engine.graph()) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    for center in engine.centers() {
        if !engine.graph().contains(&center.location) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCenterLocation,
                format!(
                    "Center '{}' is at '{}', which is not in the network",
                    center.id, center.location
                ),
            ));
        }
    }

    let mut seen = HashSet::new();
    let pooled = engine
        .registry()
        .pools()
        .flat_map(|(_, pool)| pool.iter());
    let dispatched = engine.active_dispatches().map(|d| &d.unit);
    for unit in pooled.chain(dispatched) {
        if !seen.insert(unit.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateUnit,
                format!("Unit '{}' is held in more than one place", unit.id),
            ));
        }
    }

    let held = engine.available_count() + engine.active_count();
    if held != engine.total_units() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnitCountMismatch,
            format!("{held} units held but {} were added", engine.total_units()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::models::{DispatchCenter, ResponseUnit, Severity};

    /// Raw adjacency fixture, bypassing the load-time checks.
    fn graph_from_json(json: &str) -> WeightedGraph {
        WeightedGraph::from_adjacency_unchecked(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_valid_network() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_edge("A", "B", 6.0).unwrap();
        g.add_edge("B", "C", 1.5).unwrap();
        g.add_edge("C", "C", 2.0).unwrap();
        g.add_node("island");
        assert!(validate_network(&g).is_ok());
    }

    #[test]
    fn test_asymmetric_weight() {
        let g = graph_from_json(
            r#"{
                "A": [{"to": "B", "weight": 4.0}],
                "B": [{"to": "A", "weight": 5.0}]
            }"#,
        );
        let errors = validate_network(&g).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::AsymmetricEdge);
    }

    #[test]
    fn test_missing_mirror_either_direction() {
        let forward_only = graph_from_json(
            r#"{"A": [{"to": "B", "weight": 1.0}], "B": []}"#,
        );
        let backward_only = graph_from_json(
            r#"{"A": [], "B": [{"to": "A", "weight": 1.0}]}"#,
        );
        for g in [forward_only, backward_only] {
            let errors = validate_network(&g).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ValidationErrorKind::AsymmetricEdge);
        }
    }

    #[test]
    fn test_bad_weight_and_dangling() {
        let g = graph_from_json(
            r#"{
                "A": [{"to": "B", "weight": -2.0}, {"to": "Z", "weight": 1.0}],
                "B": [{"to": "A", "weight": -2.0}]
            }"#,
        );
        let errors = validate_network(&g).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::InvalidWeight));
        assert!(kinds.contains(&ValidationErrorKind::DanglingEdge));
        assert!(kinds.contains(&ValidationErrorKind::AsymmetricEdge));
    }

    #[test]
    fn test_graph_serde_shape() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 2.0).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: WeightedGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.neighbors("A"), &[Edge::new("B", 2.0)]);
    }

    #[test]
    fn test_valid_engine() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 3.0).unwrap();
        let mut engine = DispatchEngine::new(g);
        engine.add_center(DispatchCenter::new("DC1", "A")).unwrap();
        engine.add_unit("DC1", ResponseUnit::police("U1")).unwrap();
        engine.add_unit("DC1", ResponseUnit::fire("U2")).unwrap();
        engine.submit_incident("B", Severity::Low).unwrap();
        engine.settle_queue();

        assert_eq!(engine.active_count(), 1);
        assert!(validate_engine(&engine).is_ok());
    }

    #[test]
    fn test_center_off_network() {
        let mut engine = DispatchEngine::new(WeightedGraph::new());
        engine.add_center(DispatchCenter::new("DC1", "nowhere")).unwrap();
        let errors = validate_engine(&engine).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownCenterLocation);
    }
}
