//! Error types for dispatch operations.
//!
//! Only malformed input is reported as an error. Conditions that are normal
//! simulation outcomes (an unreachable location, no matching unit, an
//! incident that is not active) are returned as `Option`, `bool` or an
//! infinite distance instead.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Input rejected at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Edge weight was zero, negative, NaN or above `MAX_EDGE_WEIGHT`.
    #[error("invalid weight {weight} for edge {from} <-> {to}: weights must be > 0 and <= 1e12")]
    InvalidEdgeWeight {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// Rejected weight.
        weight: f64,
    },

    /// A loaded adjacency entry has no mirrored entry of the same weight.
    #[error("road {from} -> {to} has no matching {to} -> {from} entry")]
    UnmirroredRoad {
        /// Node holding the entry.
        from: String,
        /// Node the entry points at.
        to: String,
    },

    /// An identifier argument was empty.
    #[error("empty identifier: {0}")]
    EmptyIdentifier(&'static str),

    /// Severity label not recognised.
    #[error("unknown severity label: {0:?}")]
    UnknownSeverity(String),

    /// A center with this id is already registered.
    #[error("duplicate dispatch center: {0}")]
    DuplicateCenter(String),

    /// A unit with this id already exists in a pool or an active dispatch.
    #[error("duplicate response unit: {0}")]
    DuplicateUnit(String),

    /// No center is registered under this id.
    #[error("unknown dispatch center: {0}")]
    UnknownCenter(String),

    /// Both endpoints of a road update are the same location.
    #[error("traffic update endpoints must differ, got {0} twice")]
    SelfLoop(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub(crate) fn require_id(value: &str, what: &'static str) -> Result<()> {
    if value.is_empty() {
        Err(DispatchError::EmptyIdentifier(what))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DispatchError::InvalidEdgeWeight {
            from: "A".into(),
            to: "B".into(),
            weight: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid weight -1 for edge A <-> B: weights must be > 0 and <= 1e12"
        );
        assert_eq!(
            DispatchError::UnknownCenter("DC9".into()).to_string(),
            "unknown dispatch center: DC9"
        );
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("DC1", "center id").is_ok());
        assert_eq!(
            require_id("", "center id"),
            Err(DispatchError::EmptyIdentifier("center id"))
        );
    }
}
