use tracing::debug;

use crate::config::{UNREACHABLE_COST, ZONE_PENALTY};
use crate::ecs::{LocationId, ZoneId};
use crate::graph::RoadGraph;

use super::algorithm::DispatchPolicy;
use super::types::{DispatchMatch, DriverCandidate};

/// Picks the available driver with the lowest dispatch cost:
/// road distance to the pickup plus `zone_penalty` when the driver's zone
/// differs from the pickup zone.
///
/// The penalty is a soft preference, not a filter. An out-of-zone driver wins
/// whenever they are more than `zone_penalty` units closer. Drivers with no
/// path to the pickup cost `unreachable_cost`, which keeps them selectable as a
/// last resort. Ties go to the driver registered first.
#[derive(Debug, Clone, Copy)]
pub struct NearestDriverPolicy {
    pub zone_penalty: u64,
    pub unreachable_cost: u64,
}

impl NearestDriverPolicy {
    pub fn new(zone_penalty: u64, unreachable_cost: u64) -> Self {
        Self {
            zone_penalty,
            unreachable_cost,
        }
    }

    pub fn cost(
        &self,
        graph: &RoadGraph,
        candidate: &DriverCandidate,
        pickup: LocationId,
        pickup_zone: ZoneId,
    ) -> u64 {
        let distance = graph
            .shortest_distance_between(candidate.location, pickup)
            .or_fallback(self.unreachable_cost);
        let penalty = if candidate.zone != pickup_zone {
            self.zone_penalty
        } else {
            0
        };
        distance.saturating_add(penalty)
    }
}

impl Default for NearestDriverPolicy {
    fn default() -> Self {
        Self::new(ZONE_PENALTY, UNREACHABLE_COST)
    }
}

impl DispatchPolicy for NearestDriverPolicy {
    fn find_match(
        &self,
        graph: &RoadGraph,
        candidates: &[DriverCandidate],
        pickup: &str,
    ) -> Option<DispatchMatch> {
        let Some(pickup_id) = graph.location_id(pickup) else {
            debug!(pickup, "pickup location not in graph");
            return None;
        };
        let pickup_zone = graph.location(pickup_id)?.zone;

        let mut best: Option<DispatchMatch> = None;
        for candidate in candidates.iter().filter(|c| c.available) {
            let cost = self.cost(graph, candidate, pickup_id, pickup_zone);
            debug!(driver = %candidate.driver, cost, pickup, "dispatch cost");
            // Strict comparison keeps the earlier driver on ties.
            if best.map_or(true, |b| cost < b.cost) {
                best = Some(DispatchMatch {
                    driver: candidate.driver,
                    cost,
                });
            }
        }
        best
    }
}
