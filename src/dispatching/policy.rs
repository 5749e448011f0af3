//! Severity policy: which units may serve an incident and how distance is
//! scored.
//!
//! # Default table
//!
//! | Severity | Required unit | Bias |
//! |----------|---------------|------|
//! | high | fire | 0.70 |
//! | medium | ambulance | 0.85 |
//! | low | any | 1.00 |
//! | unknown | any | 1.00 |
//!
//! `score = distance * bias`; lower scores win. A bias below 1.0 lets an
//! urgent incident accept a somewhat farther unit as an equally good match.

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};
use crate::models::{Severity, UnitRequirement, UnitType};

/// Policy entry for one severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityRule {
    /// Units that may serve incidents of this severity.
    pub requirement: UnitRequirement,
    /// Multiplier applied to distance when scoring.
    pub bias: f64,
}

impl SeverityRule {
    /// Creates a rule.
    pub fn new(requirement: UnitRequirement, bias: f64) -> Self {
        Self { requirement, bias }
    }
}

/// Per-severity dispatch rules.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::DispatchPolicy;
/// use u_dispatch::models::Severity;
///
/// let policy = DispatchPolicy::default();
/// assert!((policy.score(Severity::Medium, 3.0) - 2.55).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchPolicy {
    /// Rule for high severity.
    pub high: SeverityRule,
    /// Rule for medium severity.
    pub medium: SeverityRule,
    /// Rule for low severity.
    pub low: SeverityRule,
    /// Rule for unknown severity.
    pub unknown: SeverityRule,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            high: SeverityRule::new(UnitRequirement::Type(UnitType::fire()), 0.70),
            medium: SeverityRule::new(UnitRequirement::Type(UnitType::ambulance()), 0.85),
            low: SeverityRule::new(UnitRequirement::Any, 1.00),
            unknown: SeverityRule::new(UnitRequirement::Any, 1.00),
        }
    }
}

impl DispatchPolicy {
    /// The rule applied to a severity.
    pub fn rule(&self, severity: Severity) -> &SeverityRule {
        match severity {
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
            Severity::Unknown => &self.unknown,
        }
    }

    fn rule_mut(&mut self, severity: Severity) -> &mut SeverityRule {
        match severity {
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Unknown => &mut self.unknown,
        }
    }

    /// Replaces the rule for a severity.
    pub fn with_rule(mut self, severity: Severity, rule: SeverityRule) -> Self {
        *self.rule_mut(severity) = rule;
        self
    }

    /// Sets the score bias for a severity.
    pub fn with_bias(mut self, severity: Severity, bias: f64) -> Self {
        self.rule_mut(severity).bias = bias;
        self
    }

    /// Sets the unit requirement for a severity.
    pub fn with_requirement(mut self, severity: Severity, requirement: UnitRequirement) -> Self {
        self.rule_mut(severity).requirement = requirement;
        self
    }

    /// Units that may serve an incident of this severity.
    pub fn required_unit(&self, severity: Severity) -> &UnitRequirement {
        &self.rule(severity).requirement
    }

    /// Score multiplier for this severity.
    pub fn bias(&self, severity: Severity) -> f64 {
        self.rule(severity).bias
    }

    /// Score for serving an incident at `distance`. Lower is better.
    #[inline]
    pub fn score(&self, severity: Severity, distance: f64) -> f64 {
        distance * self.bias(severity)
    }

    /// Checks every bias is finite and positive.
    pub fn validate(&self) -> Result<()> {
        for severity in Severity::ALL {
            let bias = self.bias(severity);
            if !(bias.is_finite() && bias > 0.0) {
                return Err(DispatchError::InvalidConfig(format!(
                    "bias for {severity} severity must be finite and > 0, got {bias}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let p = DispatchPolicy::default();
        assert_eq!(p.required_unit(Severity::High), &UnitRequirement::of("fire"));
        assert_eq!(
            p.required_unit(Severity::Medium),
            &UnitRequirement::of("ambulance")
        );
        assert_eq!(p.required_unit(Severity::Low), &UnitRequirement::Any);
        assert_eq!(p.required_unit(Severity::Unknown), &UnitRequirement::Any);

        assert!((p.score(Severity::High, 10.0) - 7.0).abs() < 1e-10);
        assert!((p.score(Severity::Medium, 3.0) - 2.55).abs() < 1e-10);
        assert!((p.score(Severity::Low, 4.0) - 4.0).abs() < 1e-10);
        assert!((p.score(Severity::Unknown, 4.0) - 4.0).abs() < 1e-10);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let p = DispatchPolicy::default()
            .with_requirement(Severity::High, UnitRequirement::Any)
            .with_bias(Severity::Low, 1.2)
            .with_rule(
                Severity::Unknown,
                SeverityRule::new(UnitRequirement::of("police"), 0.9),
            );
        assert_eq!(p.required_unit(Severity::High), &UnitRequirement::Any);
        assert!((p.bias(Severity::High) - 0.70).abs() < 1e-10);
        assert!((p.bias(Severity::Low) - 1.2).abs() < 1e-10);
        assert_eq!(p.required_unit(Severity::Unknown), &UnitRequirement::of("police"));
    }

    #[test]
    fn test_validate_rejects_bad_bias() {
        let p = DispatchPolicy::default().with_bias(Severity::Medium, 0.0);
        assert!(matches!(p.validate(), Err(DispatchError::InvalidConfig(_))));
        let p = DispatchPolicy::default().with_bias(Severity::Low, f64::NAN);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "low": { "requirement": { "type": "police" }, "bias": 0.95 } }"#;
        let p: DispatchPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(p.required_unit(Severity::Low), &UnitRequirement::of("police"));
        assert_eq!(p.high, DispatchPolicy::default().high);
    }
}
