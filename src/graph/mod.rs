//! Road network and shortest-path search.
//!
//! [`WeightedGraph`] is the undirected network the engine routes over;
//! [`Dijkstra`] answers distance and route queries against it.

mod dijkstra;
mod weighted;

pub use dijkstra::{shortest_distance, Dijkstra, Route};
pub use weighted::{Edge, WeightedGraph, MAX_EDGE_WEIGHT};
pub(crate) use weighted::is_valid_weight;
