use crate::graph::RoadGraph;

use super::types::{DispatchMatch, DriverCandidate};

/// Selects a driver for a pickup location.
///
/// Policies see the whole fleet in registration order and must skip drivers
/// whose `available` flag is false. Implementations must be deterministic:
/// given the same graph and candidate order they return the same driver.
///
/// # Examples
///
/// ```rust
/// use dispatch_core::ecs::{DriverId, ZoneId};
/// use dispatch_core::graph::RoadGraph;
/// use dispatch_core::matching::{DispatchPolicy, DriverCandidate, NearestDriverPolicy};
///
/// let mut graph = RoadGraph::new();
/// let depot = graph.add_location("Depot", ZoneId(1)).unwrap();
/// graph.add_location("Square", ZoneId(1)).unwrap();
/// graph.add_road("Depot", "Square", 4).unwrap();
///
/// let fleet = [DriverCandidate {
///     driver: DriverId(0),
///     location: depot,
///     zone: ZoneId(1),
///     available: true,
/// }];
/// let chosen = NearestDriverPolicy::default().find_match(&graph, &fleet, "Square");
/// assert_eq!(chosen.map(|m| m.cost), Some(4));
/// ```
pub trait DispatchPolicy: Send + Sync {
    /// Returns `None` when no candidate is available or the pickup name is
    /// not part of the graph.
    fn find_match(
        &self,
        graph: &RoadGraph,
        candidates: &[DriverCandidate],
        pickup: &str,
    ) -> Option<DispatchMatch>;
}
