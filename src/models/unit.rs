//! Response unit model.
//!
//! Units are the vehicles and crews a center sends out. Unit types form an
//! open set of string tags compared case-insensitively; the three built-in
//! tags are `ambulance`, `police` and `fire`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Open type tag of a response unit (e.g., "ambulance", "fire", "hazmat").
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitType(String);

impl UnitType {
    /// Creates a type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Ambulance tag.
    pub fn ambulance() -> Self {
        Self::new("ambulance")
    }

    /// Police tag.
    pub fn police() -> Self {
        Self::new("police")
    }

    /// Fire tag.
    pub fn fire() -> Self {
        Self::new("fire")
    }

    /// The tag as given at construction.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for UnitType {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl From<&str> for UnitType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for UnitType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which units may serve an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitRequirement {
    /// Wildcard: the head of a center's pool is taken regardless of type.
    Any,
    /// Only units of this type.
    Type(UnitType),
}

impl UnitRequirement {
    /// Requirement for a specific type tag.
    pub fn of(unit_type: impl Into<UnitType>) -> Self {
        UnitRequirement::Type(unit_type.into())
    }

    /// Whether a unit satisfies this requirement.
    pub fn is_satisfied_by(&self, unit: &ResponseUnit) -> bool {
        match self {
            UnitRequirement::Any => true,
            UnitRequirement::Type(t) => unit.unit_type == *t,
        }
    }
}

impl fmt::Display for UnitRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRequirement::Any => f.write_str("any"),
            UnitRequirement::Type(t) => t.fmt(f),
        }
    }
}

/// A response unit (vehicle plus crew).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseUnit {
    /// Unique unit identifier.
    pub id: String,
    /// Unit type tag.
    pub unit_type: UnitType,
}

impl ResponseUnit {
    /// Creates a unit.
    pub fn new(id: impl Into<String>, unit_type: impl Into<UnitType>) -> Self {
        Self {
            id: id.into(),
            unit_type: unit_type.into(),
        }
    }

    /// Creates an ambulance.
    pub fn ambulance(id: impl Into<String>) -> Self {
        Self::new(id, UnitType::ambulance())
    }

    /// Creates a police car.
    pub fn police(id: impl Into<String>) -> Self {
        Self::new(id, UnitType::police())
    }

    /// Creates a fire engine.
    pub fn fire(id: impl Into<String>) -> Self {
        Self::new(id, UnitType::fire())
    }
}
