//! Dispatch domain models.
//!
//! Plain data types shared by the graph, the dispatching engine and the
//! simulation driver.
//!
//! # Lifecycle
//!
//! | Entity | Created | Destroyed |
//! |--------|---------|-----------|
//! | `Incident` | `submit_incident` | turns into an `ActiveDispatch` |
//! | `ActiveDispatch` | settle pass commits a decision | `complete_dispatch` |
//! | `ResponseUnit` | `add_unit` | never; always in one pool or one dispatch |

mod dispatch;
mod incident;
mod severity;
mod unit;

pub use dispatch::{ActiveDispatch, Assignment, DispatchDecision, Repositioning};
pub use incident::{DispatchCenter, Incident};
pub use severity::Severity;
pub use unit::{ResponseUnit, UnitRequirement, UnitType};
