//! Incident severity.
//!
//! Severity is a closed enumeration with a total order by rank:
//! `High (3) > Medium (2) > Low (1) > Unknown (0)`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DispatchError;

/// Severity of an incident.
///
/// Ordering follows [`Severity::rank`], so `Severity::High > Severity::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rank 3.
    High,
    /// Rank 2.
    Medium,
    /// Rank 1.
    Low,
    /// Rank 0. Missing or unrecognised severity.
    #[default]
    Unknown,
}

impl Severity {
    /// All severities, highest rank first.
    pub const ALL: [Severity; 4] = [
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Unknown,
    ];

    /// Numeric rank used for queue ordering and policy lookups.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Unknown => 0,
        }
    }

    /// Lenient parse: unrecognised labels map to [`Severity::Unknown`].
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Severity::Unknown)
    }

    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl FromStr for Severity {
    type Err = DispatchError;

    /// Strict parse: only `high`, `medium`, `low` and `unknown` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "unknown" => Ok(Severity::Unknown),
            _ => Err(DispatchError::UnknownSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
