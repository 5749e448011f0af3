//! Random event driver for the dispatch engine.
//!
//! The engine itself is a pure decision function; this module supplies the
//! events. [`Simulation`] replays the classic demo loop (random incidents,
//! random traffic changes, random completions, idle pre-positioning) from a
//! seeded RNG, so runs are reproducible.

mod config;
mod demo;
mod driver;

pub use config::SimulationConfig;
pub use demo::{demo_engine, demo_network};
pub use driver::{Simulation, TickReport, TrafficUpdate};
