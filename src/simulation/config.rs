//! Simulation driver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};
use crate::models::Severity;

/// Tick-loop parameters.
///
/// Defaults reproduce the classic demo run: 20 ticks, 60% chance of a new
/// incident, 25% chance of a traffic change and 40% chance of a completion
/// per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks `run` executes.
    pub ticks: usize,
    /// RNG seed; equal seeds give identical runs.
    pub seed: u64,
    /// Chance of a new incident per tick.
    pub incident_probability: f64,
    /// Chance of a traffic update per tick.
    pub traffic_probability: f64,
    /// Chance of completing one random active dispatch per tick.
    pub completion_probability: f64,
    /// A severity roll below this is `high`.
    pub high_severity_threshold: f64,
    /// A severity roll below this (and not high) is `medium`; otherwise `low`.
    pub medium_severity_threshold: f64,
    /// Smallest traffic weight drawn (inclusive).
    pub min_traffic_weight: u32,
    /// Largest traffic weight drawn (inclusive).
    pub max_traffic_weight: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 20,
            seed: 0,
            incident_probability: 0.60,
            traffic_probability: 0.25,
            completion_probability: 0.40,
            high_severity_threshold: 0.20,
            medium_severity_threshold: 0.60,
            min_traffic_weight: 2,
            max_traffic_weight: 11,
        }
    }
}

impl SimulationConfig {
    /// Sets the tick count.
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the incident arrival probability.
    pub fn with_incident_probability(mut self, p: f64) -> Self {
        self.incident_probability = p;
        self
    }

    /// Sets the traffic update probability.
    pub fn with_traffic_probability(mut self, p: f64) -> Self {
        self.traffic_probability = p;
        self
    }

    /// Sets the completion probability.
    pub fn with_completion_probability(mut self, p: f64) -> Self {
        self.completion_probability = p;
        self
    }

    /// Sets the inclusive traffic weight range.
    pub fn with_traffic_weights(mut self, min: u32, max: u32) -> Self {
        self.min_traffic_weight = min;
        self.max_traffic_weight = max;
        self
    }

    /// Maps a uniform roll in `[0, 1)` to a severity.
    pub fn severity_for(&self, roll: f64) -> Severity {
        if roll < self.high_severity_threshold {
            Severity::High
        } else if roll < self.medium_severity_threshold {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Checks probabilities, thresholds and the weight range.
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("incident_probability", self.incident_probability),
            ("traffic_probability", self.traffic_probability),
            ("completion_probability", self.completion_probability),
            ("high_severity_threshold", self.high_severity_threshold),
            ("medium_severity_threshold", self.medium_severity_threshold),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(DispatchError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if self.high_severity_threshold > self.medium_severity_threshold {
            return Err(DispatchError::InvalidConfig(
                "high_severity_threshold must not exceed medium_severity_threshold".into(),
            ));
        }
        if self.min_traffic_weight == 0 || self.min_traffic_weight > self.max_traffic_weight {
            return Err(DispatchError::InvalidConfig(format!(
                "traffic weight range {}..={} must be non-empty and start above 0",
                self.min_traffic_weight, self.max_traffic_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.ticks, 20);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_severity_thresholds() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.severity_for(0.0), Severity::High);
        assert_eq!(cfg.severity_for(0.19), Severity::High);
        assert_eq!(cfg.severity_for(0.20), Severity::Medium);
        assert_eq!(cfg.severity_for(0.59), Severity::Medium);
        assert_eq!(cfg.severity_for(0.60), Severity::Low);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = SimulationConfig::default().with_incident_probability(1.5);
        assert!(matches!(bad.validate(), Err(DispatchError::InvalidConfig(_))));

        let bad = SimulationConfig::default().with_traffic_probability(f64::NAN);
        assert!(bad.validate().is_err());

        let bad = SimulationConfig::default().with_traffic_weights(5, 4);
        assert!(bad.validate().is_err());

        let bad = SimulationConfig::default().with_traffic_weights(0, 4);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let cfg: SimulationConfig = serde_json::from_str(r#"{"ticks": 5, "seed": 7}"#).unwrap();
        assert_eq!(cfg.ticks, 5);
        assert_eq!(cfg.seed, 7);
        assert!((cfg.incident_probability - 0.60).abs() < 1e-10);
    }
}
