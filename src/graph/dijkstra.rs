//! Single-source shortest paths (Dijkstra).
//!
//! # Algorithm
//!
//! 1. Seed a min-heap frontier with `(0, start)`.
//! 2. Pop the cheapest node; skip it if already settled, otherwise settle it.
//! 3. Stop as soon as the target is settled.
//! 4. Relax every adjacency entry towards unsettled neighbours.
//!
//! Weights are read from the graph at call time and nothing is cached, so a
//! traffic update is visible to the very next query.
//!
//! # Preconditions
//! All weights are positive and bounded by
//! [`MAX_EDGE_WEIGHT`](super::MAX_EDGE_WEIGHT).
//! [`WeightedGraph`] enforces this on insertion and on load.
//!
//! # Complexity
//! O((V + E) log V) per query.
//!
//! # Reference
//! Dijkstra (1959), "A note on two problems in connexion with graphs"

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use super::WeightedGraph;

/// A shortest route between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Locations from start to target, inclusive.
    pub nodes: Vec<String>,
    /// Total travel cost.
    pub distance: f64,
}

impl Route {
    /// Number of road segments travelled.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Dijkstra search over a borrowed graph.
///
/// Construct a fresh one per query batch; it holds no state between calls.
///
/// # Example
/// ```
/// use u_dispatch::graph::{Dijkstra, WeightedGraph};
///
/// let mut g = WeightedGraph::new();
/// g.add_edge("A", "B", 5.0).unwrap();
/// g.add_edge("B", "C", 2.0).unwrap();
/// g.add_edge("A", "C", 10.0).unwrap();
///
/// let dijkstra = Dijkstra::new(&g);
/// assert_eq!(dijkstra.distance("A", "C"), 7.0);
/// assert_eq!(dijkstra.route("A", "C").unwrap().nodes, vec!["A", "B", "C"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dijkstra<'a> {
    graph: &'a WeightedGraph,
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest distance.
/// Ties fall back to the node name to keep heap order deterministic.
#[derive(Debug)]
struct Frontier<'a> {
    dist: f64,
    node: &'a str,
}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

#[derive(Default)]
struct Search<'a> {
    dist: HashMap<&'a str, f64>,
    prev: HashMap<&'a str, &'a str>,
    settled: HashSet<&'a str>,
    reached: Option<f64>,
}

impl<'a> Dijkstra<'a> {
    /// Creates a search over `graph`.
    pub fn new(graph: &'a WeightedGraph) -> Self {
        Self { graph }
    }

    /// Shortest distance from `start` to `target`.
    ///
    /// Returns `0.0` when `start == target` (even for unknown locations) and
    /// `f64::INFINITY` when either endpoint is unknown or unreachable.
    pub fn distance(&self, start: &str, target: &str) -> f64 {
        if start == target {
            return 0.0;
        }
        if !self.graph.contains(start) || !self.graph.contains(target) {
            return f64::INFINITY;
        }
        self.search(start, Some(target))
            .reached
            .unwrap_or(f64::INFINITY)
    }

    /// Shortest route from `start` to `target`, or `None` if unreachable.
    pub fn route(&self, start: &str, target: &str) -> Option<Route> {
        if start == target {
            return Some(Route {
                nodes: vec![start.to_string()],
                distance: 0.0,
            });
        }
        if !self.graph.contains(target) {
            return None;
        }

        let search = self.search(start, Some(target));
        let distance = search.reached?;

        let mut nodes = vec![target.to_string()];
        let mut cursor = target;
        while let Some(&p) = search.prev.get(cursor) {
            nodes.push(p.to_string());
            cursor = p;
        }
        nodes.reverse();
        Some(Route { nodes, distance })
    }

    /// Distances from `start` to every reachable node, `start` included.
    ///
    /// Empty when `start` is not in the graph.
    pub fn distances_from(&self, start: &str) -> BTreeMap<String, f64> {
        let search = self.search(start, None);
        search
            .settled
            .iter()
            .filter_map(|&n| search.dist.get(n).map(|&d| (n.to_string(), d)))
            .collect()
    }

    fn search(&self, start: &str, target: Option<&str>) -> Search<'a> {
        let mut search = Search::default();
        let Some(source) = self.graph.node_key(start) else {
            return search;
        };

        search.dist.insert(source, 0.0);
        let mut frontier = BinaryHeap::new();
        frontier.push(Frontier {
            dist: 0.0,
            node: source,
        });

        while let Some(Frontier { dist, node }) = frontier.pop() {
            if !search.settled.insert(node) {
                continue;
            }
            if target == Some(node) {
                search.reached = Some(dist);
                return search;
            }

            for edge in self.graph.neighbors(node) {
                let next = edge.to.as_str();
                if search.settled.contains(next) {
                    continue;
                }
                let alt = dist + edge.weight;
                let known = search.dist.get(next).copied().unwrap_or(f64::INFINITY);
                if alt < known {
                    search.dist.insert(next, alt);
                    search.prev.insert(next, node);
                    frontier.push(Frontier { dist: alt, node: next });
                }
            }
        }

        search
    }
}

/// Shortest distance between two locations; see [`Dijkstra::distance`].
pub fn shortest_distance(graph: &WeightedGraph, start: &str, target: &str) -> f64 {
    Dijkstra::new(graph).distance(start, target)
}
