use crate::config::UNREACHABLE_COST;
use crate::graph::RoadGraph;

use super::algorithm::DispatchPolicy;
use super::types::{DispatchMatch, DriverCandidate};

/// First available driver in fleet order, regardless of distance or zone.
///
/// Useful as a baseline when comparing against [`NearestDriverPolicy`](super::NearestDriverPolicy)
/// and in tests that need a predictable choice. The reported cost is the plain
/// road distance to the pickup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailablePolicy;

impl DispatchPolicy for FirstAvailablePolicy {
    fn find_match(
        &self,
        graph: &RoadGraph,
        candidates: &[DriverCandidate],
        pickup: &str,
    ) -> Option<DispatchMatch> {
        let pickup_id = graph.location_id(pickup)?;
        candidates
            .iter()
            .find(|c| c.available)
            .map(|c| DispatchMatch {
                driver: c.driver,
                cost: graph
                    .shortest_distance_between(c.location, pickup_id)
                    .or_fallback(UNREACHABLE_COST),
            })
    }
}
