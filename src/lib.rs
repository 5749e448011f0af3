//! Emergency-response dispatch for the U-Engine ecosystem.
//!
//! Incidents arrive at locations on a road network; the engine picks the
//! best available response unit for each one using shortest-path distance
//! and incident severity, and units return to service when a job completes.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Incident`, `Severity`, `ResponseUnit`,
//!   `UnitType`, `DispatchCenter`, `ActiveDispatch`, `Assignment`
//! - **`graph`**: `WeightedGraph` road network and `Dijkstra` shortest paths
//! - **`dispatching`**: `DispatchEngine` with its incident queue, unit pools,
//!   hotspot predictor and severity policy
//! - **`simulation`**: Seeded random event driver and demo fixture
//! - **`validation`**: Network symmetry and unit-conservation checks
//!
//! # Execution model
//!
//! Single-threaded and synchronous. Each call runs to completion before the
//! next; a host that shares an engine across threads must serialize access
//! itself (e.g., behind a `Mutex`).
//!
//! # References
//!
//! - Dijkstra (1959), "A note on two problems in connexion with graphs"
//! - Larson & Odoni (1981), "Urban Operations Research", Ch. 5

pub mod dispatching;
pub mod error;
pub mod graph;
pub mod models;
pub mod simulation;
pub mod validation;

pub use error::{DispatchError, Result};
