//! Dispatch decision engine and its building blocks.
//!
//! # Components
//!
//! - **`IncidentQueue`**: pending incidents, highest severity first, FIFO
//!   among equal severities.
//! - **`UnitRegistry`**: FIFO pool of available units per center.
//! - **`HotspotPredictor`**: incident counts per location.
//! - **`DispatchPolicy`**: required unit type and score bias per severity.
//! - **`DispatchEngine`**: greedy matcher tying the above to a road network.
//!
//! # Score Convention
//! **Lower score = better match.** `score = shortest distance * severity bias`.
//!
//! # Usage
//!
//! ```
//! use u_dispatch::dispatching::DispatchEngine;
//! use u_dispatch::graph::WeightedGraph;
//! use u_dispatch::models::{DispatchCenter, ResponseUnit, Severity};
//!
//! let mut graph = WeightedGraph::new();
//! graph.add_edge("A", "B", 4.0).unwrap();
//!
//! let mut engine = DispatchEngine::new(graph);
//! engine.add_center(DispatchCenter::new("DC1", "A")).unwrap();
//! engine.add_unit("DC1", ResponseUnit::fire("U1")).unwrap();
//!
//! engine.submit_incident("B", Severity::High).unwrap();
//! let assigned = engine.settle_queue();
//! assert_eq!(assigned.len(), 1);
//! assert_eq!(engine.active_count(), 1);
//! ```

mod engine;
mod policy;
mod predictor;
mod queue;
mod registry;
mod stats;

pub use engine::DispatchEngine;
pub use policy::{DispatchPolicy, SeverityRule};
pub use predictor::HotspotPredictor;
pub use queue::IncidentQueue;
pub use registry::UnitRegistry;
pub use stats::DispatchStats;
