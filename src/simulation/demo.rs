//! Demo city: six locations, three centers, six units.
//!
//! Roads: A-B 4, B-C 3, C-D 6, A-E 7, E-D 2, B-E 5, D-F 4, C-F 8.
//!
//! | Center | Location | Units |
//! |--------|----------|-------|
//! | DC1 | A | U1 ambulance, U2 police |
//! | DC2 | D | U3 fire, U4 ambulance |
//! | DC3 | F | U5 police, U6 fire |

use crate::dispatching::DispatchEngine;
use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::models::{DispatchCenter, ResponseUnit};

/// Builds the demo road network.
pub fn demo_network() -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::new();
    for node in ["A", "B", "C", "D", "E", "F"] {
        graph.add_node(node);
    }
    for (from, to, weight) in [
        ("A", "B", 4.0),
        ("B", "C", 3.0),
        ("C", "D", 6.0),
        ("A", "E", 7.0),
        ("E", "D", 2.0),
        ("B", "E", 5.0),
        ("D", "F", 4.0),
        ("C", "F", 8.0),
    ] {
        graph.add_edge(from, to, weight)?;
    }
    Ok(graph)
}

/// Builds an engine over the demo network with its centers and units.
pub fn demo_engine() -> Result<DispatchEngine> {
    let mut engine = DispatchEngine::new(demo_network()?);

    engine.add_center(DispatchCenter::new("DC1", "A"))?;
    engine.add_center(DispatchCenter::new("DC2", "D"))?;
    engine.add_center(DispatchCenter::new("DC3", "F"))?;

    engine.add_unit("DC1", ResponseUnit::ambulance("U1"))?;
    engine.add_unit("DC1", ResponseUnit::police("U2"))?;
    engine.add_unit("DC2", ResponseUnit::fire("U3"))?;
    engine.add_unit("DC2", ResponseUnit::ambulance("U4"))?;
    engine.add_unit("DC3", ResponseUnit::police("U5"))?;
    engine.add_unit("DC3", ResponseUnit::fire("U6"))?;

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_demo_shape() {
        let engine = demo_engine().unwrap();
        assert_eq!(engine.graph().node_count(), 6);
        assert_eq!(engine.graph().edge_count(), 8);
        assert_eq!(engine.centers().len(), 3);
        assert_eq!(engine.total_units(), 6);
        assert_eq!(engine.available_count(), 6);
    }

    #[test]
    fn test_demo_high_incident_at_c() {
        let mut engine = demo_engine().unwrap();
        engine.submit_incident("C", Severity::High).unwrap();

        // fire units: U3 at D (distance 6), U6 at F (distance 8)
        let assigned = engine.settle_queue();
        assert_eq!(assigned[0].unit_id, "U3");
        assert_eq!(assigned[0].center_id, "DC2");
        assert!((assigned[0].distance - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_demo_medium_incident_at_b() {
        let mut engine = demo_engine().unwrap();
        engine.submit_incident("B", Severity::Medium).unwrap();

        // ambulances: U1 at A (distance 4), U4 at D (distance 7)
        let assigned = engine.settle_queue();
        assert_eq!(assigned[0].unit_id, "U1");
        assert_eq!(assigned[0].center_id, "DC1");
    }
}
