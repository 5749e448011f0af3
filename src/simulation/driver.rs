//! Seeded tick loop around a [`DispatchEngine`].
//!
//! # Tick
//!
//! 1. With `incident_probability`, submit an incident at a random location
//!    with a random severity.
//! 2. With `traffic_probability`, set a random weight on the road between two
//!    distinct random locations (a no-op if no such road exists).
//! 3. Settle the queue.
//! 4. If anything is active, with `completion_probability` complete one
//!    random active dispatch.
//! 5. If the queue is empty, pre-position one unit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SimulationConfig;
use crate::dispatching::DispatchEngine;
use crate::error::Result;
use crate::models::{Assignment, Repositioning};

/// A traffic change applied during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficUpdate {
    /// First endpoint.
    pub from: String,
    /// Second endpoint.
    pub to: String,
    /// New weight.
    pub weight: f64,
    /// Adjacency entries changed (0 if there is no road).
    pub updated: usize,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: usize,
    /// Incident submitted this tick.
    pub submitted: Option<String>,
    /// Traffic update applied this tick.
    pub traffic: Option<TrafficUpdate>,
    /// Assignments committed by this tick's settle pass.
    pub assignments: Vec<Assignment>,
    /// Incident whose dispatch completed this tick.
    pub completed: Option<String>,
    /// Pre-positioning move made this tick.
    pub repositioned: Option<Repositioning>,
    /// Queue depth at the end of the tick.
    pub queued: usize,
    /// Active dispatches at the end of the tick.
    pub active: usize,
}

/// Random event source driving an engine.
///
/// # Example
/// ```
/// use u_dispatch::simulation::{demo_engine, Simulation, SimulationConfig};
///
/// let config = SimulationConfig::default().with_seed(42).with_ticks(10);
/// let mut sim = Simulation::new(demo_engine().unwrap(), config).unwrap();
/// let reports = sim.run().unwrap();
/// assert_eq!(reports.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    engine: DispatchEngine,
    config: SimulationConfig,
    rng: StdRng,
    tick: usize,
}

impl Simulation {
    /// Creates a simulation seeded from `config.seed`.
    pub fn new(engine: DispatchEngine, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            engine,
            config,
            rng,
            tick: 0,
        })
    }

    /// Runs `config.ticks` ticks.
    pub fn run(&mut self) -> Result<Vec<TickReport>> {
        (0..self.config.ticks).map(|_| self.step()).collect()
    }

    /// Runs one tick.
    pub fn step(&mut self) -> Result<TickReport> {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..Default::default()
        };

        if self.rng.random::<f64>() < self.config.incident_probability {
            report.submitted = self.random_incident()?;
        }

        if self.rng.random::<f64>() < self.config.traffic_probability {
            report.traffic = self.random_traffic_update()?;
        }

        report.assignments = self.engine.settle_queue();

        if self.engine.active_count() > 0
            && self.rng.random::<f64>() < self.config.completion_probability
        {
            report.completed = self.random_completion();
        }

        if self.engine.queue_depth() == 0 {
            report.repositioned = self.engine.pre_position_if_idle();
        }

        report.queued = self.engine.queue_depth();
        report.active = self.engine.active_count();
        info!(
            tick = report.tick,
            queued = report.queued,
            active = report.active,
            "tick finished"
        );
        Ok(report)
    }

    fn random_incident(&mut self) -> Result<Option<String>> {
        let Some(location) = self.random_node() else {
            return Ok(None);
        };
        let severity = self.config.severity_for(self.rng.random::<f64>());
        self.engine.submit_incident(&location, severity).map(Some)
    }

    fn random_node(&mut self) -> Option<String> {
        let count = self.engine.graph().node_count();
        if count == 0 {
            return None;
        }
        let idx = self.rng.random_range(0..count);
        self.engine.graph().nodes().nth(idx).map(str::to_string)
    }

    fn random_traffic_update(&mut self) -> Result<Option<TrafficUpdate>> {
        let nodes: Vec<String> = self.engine.graph().nodes().map(str::to_string).collect();
        if nodes.len() < 2 {
            return Ok(None);
        }

        let a = self.rng.random_range(0..nodes.len());
        let mut b = self.rng.random_range(0..nodes.len() - 1);
        if b >= a {
            b += 1;
        }
        let weight = f64::from(
            self.rng
                .random_range(self.config.min_traffic_weight..=self.config.max_traffic_weight),
        );

        let updated = self
            .engine
            .apply_traffic_update(&nodes[a], &nodes[b], weight)?;
        Ok(Some(TrafficUpdate {
            from: nodes[a].clone(),
            to: nodes[b].clone(),
            weight,
            updated,
        }))
    }

    fn random_completion(&mut self) -> Option<String> {
        let count = self.engine.active_count();
        let idx = self.rng.random_range(0..count);
        let incident_id = self
            .engine
            .active_dispatches()
            .nth(idx)
            .map(|d| d.incident.id.clone())?;
        self.engine
            .complete_dispatch(&incident_id)
            .then_some(incident_id)
    }

    /// The driven engine.
    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    /// Mutable access for manual event injection between ticks.
    pub fn engine_mut(&mut self) -> &mut DispatchEngine {
        &mut self.engine
    }

    /// Consumes the simulation, returning the engine.
    pub fn into_engine(self) -> DispatchEngine {
        self.engine
    }

    /// Ticks run so far.
    pub fn ticks_run(&self) -> usize {
        self.tick
    }
}
