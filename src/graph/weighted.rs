//! Undirected weighted road network.
//!
//! Stored as an adjacency list keyed by location name. Every road is kept as
//! two mirrored entries, `u -> (v, w)` and `v -> (u, w)`, and every mutation
//! keeps the two sides equal.
//!
//! Parallel roads between the same pair are not merged: each `add_edge`
//! call appends a new pair of entries, and shortest-path search treats them
//! as independent alternatives. `update_edge_weight` rewrites every matching
//! entry in both directions.
//!
//! Deserialization runs the same checks as `add_edge`: every weight must be
//! valid and every `u -> v` entry must be mirrored by a `v -> u` entry of
//! the same weight.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{require_id, DispatchError, Result};

/// Largest accepted road weight.
///
/// Keeps path sums far from `f64` overflow on any realistic network.
pub const MAX_EDGE_WEIGHT: f64 = 1e12;

/// One adjacency entry: a road to `to` with travel cost `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Neighbour location.
    pub to: String,
    /// Travel cost (> 0).
    pub weight: f64,
}

impl Edge {
    /// Creates an adjacency entry.
    pub fn new(to: impl Into<String>, weight: f64) -> Self {
        Self {
            to: to.into(),
            weight,
        }
    }
}

/// Undirected weighted graph over named locations.
///
/// Nodes iterate in lexicographic order, which keeps random node picks in
/// the simulation reproducible for a given seed.
///
/// # Example
/// ```
/// use u_dispatch::graph::WeightedGraph;
///
/// let mut g = WeightedGraph::new();
/// g.add_edge("A", "B", 5.0).unwrap();
/// assert_eq!(g.neighbors("B")[0].to, "A");
/// assert!(g.neighbors("Z").is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct WeightedGraph {
    adjacency: BTreeMap<String, Vec<Edge>>,
}

/// Wire shape of [`WeightedGraph`] before validation.
#[derive(Deserialize)]
struct RawGraph {
    adjacency: BTreeMap<String, Vec<Edge>>,
}

impl TryFrom<RawGraph> for WeightedGraph {
    type Error = DispatchError;

    fn try_from(raw: RawGraph) -> Result<Self> {
        let mut pairs: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
        for (from, edges) in &raw.adjacency {
            require_id(from, "node")?;
            for edge in edges {
                require_id(&edge.to, "edge endpoint")?;
                check_weight(from, &edge.to, edge.weight)?;
                pairs
                    .entry((from.as_str(), edge.to.as_str()))
                    .or_default()
                    .push(edge.weight);
            }
        }

        for list in pairs.values_mut() {
            list.sort_by(f64::total_cmp);
        }
        for (&(from, to), forward) in &pairs {
            // a self-loop is stored as two entries on the same node
            let mirrored = if from == to {
                forward.len() % 2 == 0
            } else {
                pairs.get(&(to, from)) == Some(forward)
            };
            if !mirrored {
                return Err(DispatchError::UnmirroredRoad {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        Ok(Self {
            adjacency: raw.adjacency,
        })
    }
}

impl WeightedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a node exists. Idempotent.
    pub fn add_node(&mut self, location: impl Into<String>) {
        self.adjacency.entry(location.into()).or_default();
    }

    /// Adds an undirected road, creating missing endpoints.
    ///
    /// # Errors
    /// [`DispatchError::InvalidEdgeWeight`] unless `weight` is finite and
    /// positive, [`DispatchError::EmptyIdentifier`] for an empty endpoint.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        require_id(from, "edge endpoint")?;
        require_id(to, "edge endpoint")?;
        check_weight(from, to, weight)?;

        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(Edge::new(to, weight));
        self.adjacency
            .entry(to.to_string())
            .or_default()
            .push(Edge::new(from, weight));
        Ok(())
    }

    /// Sets the weight of every `from <-> to` entry in both directions.
    ///
    /// Returns the number of adjacency entries rewritten; `0` means there is
    /// no such road and nothing changed.
    ///
    /// # Errors
    /// [`DispatchError::InvalidEdgeWeight`] unless `weight` is finite and
    /// positive.
    pub fn update_edge_weight(&mut self, from: &str, to: &str, weight: f64) -> Result<usize> {
        check_weight(from, to, weight)?;

        let mut updated = self.rewrite(from, to, weight);
        if from != to {
            updated += self.rewrite(to, from, weight);
        }
        Ok(updated)
    }

    fn rewrite(&mut self, from: &str, to: &str, weight: f64) -> usize {
        let Some(edges) = self.adjacency.get_mut(from) else {
            return 0;
        };
        let mut count = 0;
        for edge in edges.iter_mut().filter(|e| e.to == to) {
            edge.weight = weight;
            count += 1;
        }
        count
    }

    /// Removes a node and every entry pointing at it.
    ///
    /// Returns `false` if the node was not present.
    pub fn remove_node(&mut self, location: &str) -> bool {
        let existed = self.adjacency.remove(location).is_some();
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.to != location);
        }
        existed
    }

    /// Adjacency entries of a node; empty for unknown nodes.
    pub fn neighbors(&self, location: &str) -> &[Edge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Known node identifiers in lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Whether the node exists.
    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// The graph-owned key for `location`, if present.
    pub(crate) fn node_key(&self, location: &str) -> Option<&str> {
        self.adjacency
            .get_key_value(location)
            .map(|(k, _)| k.as_str())
    }

    /// Lightest weight among the `from -> to` entries, if any.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min_by(f64::total_cmp)
    }

    /// Builds a graph from raw adjacency without any checks.
    #[cfg(test)]
    pub(crate) fn from_adjacency_unchecked(adjacency: BTreeMap<String, Vec<Edge>>) -> Self {
        Self { adjacency }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected roads (each stored as two entries).
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.adjacency.values().map(Vec::len).sum();
        entries / 2
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Whether `weight` is usable as a road weight: positive and at most
/// [`MAX_EDGE_WEIGHT`]. NaN is rejected.
pub(crate) fn is_valid_weight(weight: f64) -> bool {
    weight > 0.0 && weight <= MAX_EDGE_WEIGHT
}

fn check_weight(from: &str, to: &str, weight: f64) -> Result<()> {
    if is_valid_weight(weight) {
        Ok(())
    } else {
        Err(DispatchError::InvalidEdgeWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_entry(g: &WeightedGraph, from: &str, to: &str, w: f64) -> bool {
        g.neighbors(from)
            .iter()
            .any(|e| e.to == to && (e.weight - w).abs() < 1e-10)
    }

    #[test]
    fn test_add_node_idempotent() {
        let mut g = WeightedGraph::new();
        g.add_node("A");
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_node("A");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.neighbors("A").len(), 1);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        assert!(has_entry(&g, "A", "B", 4.0));
        assert!(has_entry(&g, "B", "A", 4.0));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_add_edge_rejects_bad_weight() {
        let mut g = WeightedGraph::new();
        for w in [0.0, -3.0, f64::NAN, f64::INFINITY, f64::MAX, MAX_EDGE_WEIGHT * 2.0] {
            assert!(matches!(
                g.add_edge("A", "B", w),
                Err(DispatchError::InvalidEdgeWeight { .. })
            ));
        }
        assert!(g.is_empty());
        assert_eq!(
            g.add_edge("", "B", 1.0),
            Err(DispatchError::EmptyIdentifier("edge endpoint"))
        );
    }

    #[test]
    fn test_parallel_edges_kept() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_edge("A", "B", 9.0).unwrap();
        assert_eq!(g.neighbors("A").len(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight("A", "B"), Some(4.0));
    }

    #[test]
    fn test_update_weight_all_matches_both_directions() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_edge("A", "B", 9.0).unwrap();
        g.add_edge("B", "C", 1.0).unwrap();

        let updated = g.update_edge_weight("B", "A", 2.5).unwrap();
        assert_eq!(updated, 4);
        assert!(g
            .neighbors("A")
            .iter()
            .all(|e| (e.weight - 2.5).abs() < 1e-10));
        assert!(has_entry(&g, "B", "A", 2.5));
        assert!(has_entry(&g, "B", "C", 1.0));
    }

    #[test]
    fn test_update_missing_edge_is_noop() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_node("C");
        assert_eq!(g.update_edge_weight("A", "C", 7.0), Ok(0));
        assert_eq!(g.update_edge_weight("X", "Y", 7.0), Ok(0));
        assert!(has_entry(&g, "A", "B", 4.0));
        assert!(g.update_edge_weight("A", "B", -1.0).is_err());
    }

    #[test]
    fn test_remove_node_strips_references() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_edge("B", "C", 1.0).unwrap();
        g.add_edge("A", "C", 1.0).unwrap();

        assert!(g.remove_node("B"));
        assert!(!g.contains("B"));
        assert!(g.nodes().all(|n| g.neighbors(n).iter().all(|e| e.to != "B")));
        assert_eq!(g.edge_count(), 1);
        assert!(!g.remove_node("B"));
    }

    #[test]
    fn test_max_weight_accepted() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", MAX_EDGE_WEIGHT).unwrap();
        assert_eq!(g.weight("B", "A"), Some(MAX_EDGE_WEIGHT));
        assert!(g.update_edge_weight("A", "B", f64::MAX).is_err());
    }

    #[test]
    fn test_deserialize_valid_graph() {
        let g: WeightedGraph = serde_json::from_str(
            r#"{"adjacency": {
                "A": [{"to": "B", "weight": 4.0}, {"to": "A", "weight": 1.0}, {"to": "A", "weight": 1.0}],
                "B": [{"to": "A", "weight": 4.0}],
                "island": []
            }}"#,
        )
        .unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(has_entry(&g, "B", "A", 4.0));
    }

    #[test]
    fn test_deserialize_rejects_bad_weight() {
        for weight in ["-5.0", "0.0", "1e300"] {
            let json = format!(
                r#"{{"adjacency": {{
                    "A": [{{"to": "B", "weight": {weight}}}],
                    "B": [{{"to": "A", "weight": {weight}}}]
                }}}}"#
            );
            let err = serde_json::from_str::<WeightedGraph>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid weight"), "{err}");
        }
    }

    #[test]
    fn test_deserialize_rejects_one_sided_roads() {
        for json in [
            r#"{"adjacency": {"A": [{"to": "B", "weight": 5.0}], "B": []}}"#,
            r#"{"adjacency": {"A": [{"to": "B", "weight": 5.0}]}}"#,
            r#"{"adjacency": {
                "A": [{"to": "B", "weight": 5.0}],
                "B": [{"to": "A", "weight": 6.0}]
            }}"#,
            r#"{"adjacency": {"A": [{"to": "A", "weight": 1.0}]}}"#,
        ] {
            let err = serde_json::from_str::<WeightedGraph>(json).unwrap_err();
            assert!(err.to_string().contains("no matching"), "{err}");
        }
    }

    #[test]
    fn test_unknown_neighbors_empty() {
        let g = WeightedGraph::new();
        assert!(g.neighbors("nowhere").is_empty());
        assert_eq!(g.weight("A", "B"), None);
    }
}
