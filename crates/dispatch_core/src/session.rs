//! The dispatch session: one object that owns the road graph, the fleet, the
//! riders, the trip ledger and the undo history.
//!
//! All state lives in a private ECS [`World`]; records are entities and the
//! registries are resources. Callers only ever hold typed ids. Every operation
//! runs to completion before returning.

use bevy_ecs::prelude::World;

use crate::config::DispatchConfig;
use crate::ecs::{Driver, DriverId, LocationId, Rider, RiderId, Trip, TripId, Vehicle, ZoneId};
use crate::error::DispatchError;
use crate::fleet::{self, FleetDirectory};
use crate::graph::{Distance, Location, RoadGraph, Route};
use crate::ledger::{self, TripLedger};
use crate::matching::{build_policy, DispatchPolicy, DispatchPolicyResource};
use crate::riders::{self, RiderRegistry};
use crate::rollback::{self, RollbackManager, UndoOutcome};
use crate::telemetry::{DriverSnapshot, SessionCounts, TripSnapshot, ZoneSnapshot};

pub struct DispatchSession {
    world: World,
}

impl Default for DispatchSession {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl DispatchSession {
    pub fn new(config: DispatchConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(RoadGraph::new());
        world.insert_resource(FleetDirectory::default());
        world.insert_resource(RiderRegistry::default());
        world.insert_resource(TripLedger::default());
        world.insert_resource(RollbackManager::default());
        world.insert_resource(DispatchPolicyResource::new(build_policy(&config)));
        world.insert_resource(config);
        Self { world }
    }

    /// Replace the dispatch policy chosen from the config.
    ///
    /// The stored [`DispatchConfig`] is left as it was, so its `policy`,
    /// `zone_penalty` and `unreachable_cost` no longer describe how drivers are
    /// picked. Pricing still comes from the config.
    pub fn with_policy(mut self, policy: Box<dyn DispatchPolicy>) -> Self {
        self.world.insert_resource(DispatchPolicyResource::new(policy));
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &DispatchConfig {
        self.world.resource::<DispatchConfig>()
    }

    pub fn graph(&self) -> &RoadGraph {
        self.world.resource::<RoadGraph>()
    }

    // Network setup

    pub fn add_location(&mut self, name: &str, zone: ZoneId) -> Result<LocationId, DispatchError> {
        self.world.resource_mut::<RoadGraph>().add_location(name, zone)
    }

    pub fn add_road(&mut self, a: &str, b: &str, weight: u32) -> Result<(), DispatchError> {
        self.world.resource_mut::<RoadGraph>().add_road(a, b, weight)
    }

    pub fn name_zone(&mut self, zone: ZoneId, name: &str) {
        self.world.resource_mut::<RoadGraph>().name_zone(zone, name);
    }

    // Fleet and riders

    pub fn add_driver(
        &mut self,
        name: &str,
        model: Option<&str>,
        plate: Option<&str>,
        location: &str,
        zone: ZoneId,
    ) -> Result<DriverId, DispatchError> {
        fleet::spawn_driver(&mut self.world, name, Vehicle::new(model, plate), location, zone)
    }

    pub fn add_rider(&mut self, name: &str, location: &str) -> Result<RiderId, DispatchError> {
        riders::spawn_rider(&mut self.world, name, location)
    }

    // Trip lifecycle

    pub fn request_trip(
        &mut self,
        rider: RiderId,
        pickup: &str,
        dropoff: &str,
        manual_driver: Option<DriverId>,
    ) -> Result<TripId, DispatchError> {
        ledger::request_trip(&mut self.world, rider, pickup, dropoff, manual_driver)
    }

    pub fn start_trip(&mut self, trip: TripId) -> Result<(), DispatchError> {
        ledger::start_trip(&mut self.world, trip)
    }

    /// Returns the fare charged.
    pub fn complete_trip(&mut self, trip: TripId) -> Result<f64, DispatchError> {
        ledger::complete_trip(&mut self.world, trip)
    }

    pub fn cancel_trip(&mut self, trip: TripId) -> Result<(), DispatchError> {
        ledger::cancel_trip(&mut self.world, trip)
    }

    pub fn undo_last_action(&mut self) -> Result<UndoOutcome, DispatchError> {
        rollback::undo_last_operation(&mut self.world)
    }

    pub fn undo_depth(&self) -> usize {
        self.world.resource::<RollbackManager>().depth()
    }

    // Queries

    pub fn shortest_distance(&self, from: &str, to: &str) -> Distance {
        self.graph().shortest_distance(from, to)
    }

    pub fn shortest_route(&self, from: &str, to: &str) -> Option<Route> {
        self.graph().shortest_route(from, to)
    }

    /// Like [`shortest_distance`](Self::shortest_distance) but tells unknown
    /// names apart from missing paths.
    pub fn route_distance(&self, from: &str, to: &str) -> Result<u64, DispatchError> {
        let graph = self.graph();
        for name in [from, to] {
            if graph.location_id(name).is_none() {
                return Err(DispatchError::UnknownLocation(name.to_string()));
            }
        }
        graph
            .shortest_distance(from, to)
            .value()
            .ok_or_else(|| DispatchError::Unreachable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    pub fn locations(&self) -> &[Location] {
        self.graph().locations()
    }

    pub fn locations_in_zone(&self, zone: ZoneId) -> Vec<&Location> {
        self.graph().locations_in_zone(zone)
    }

    pub fn zone_name(&self, zone: ZoneId) -> Option<&str> {
        self.graph().zone_name(zone)
    }

    pub fn trip(&self, id: TripId) -> Result<&Trip, DispatchError> {
        ledger::trip(&self.world, id)
    }

    pub fn driver(&self, id: DriverId) -> Result<&Driver, DispatchError> {
        fleet::driver(&self.world, id)
    }

    pub fn rider(&self, id: RiderId) -> Result<&Rider, DispatchError> {
        riders::rider(&self.world, id)
    }

    pub fn trips(&self) -> Vec<&Trip> {
        ledger::trips(&self.world)
    }

    pub fn drivers(&self) -> Vec<&Driver> {
        fleet::drivers(&self.world)
    }

    pub fn riders(&self) -> Vec<&Rider> {
        riders::riders(&self.world)
    }

    /// Available drivers in fleet order, as offered for manual selection.
    pub fn available_drivers(&self) -> Vec<&Driver> {
        self.drivers().into_iter().filter(|d| d.available).collect()
    }

    pub fn find_active_trip_for(&self, rider: RiderId) -> Result<Option<TripId>, DispatchError> {
        ledger::find_active_trip_for(&self.world, rider)
    }

    pub fn counts(&self) -> SessionCounts {
        let mut counts = SessionCounts::default();
        for trip in self.trips() {
            counts.add_trip(trip.state);
        }
        for driver in self.drivers() {
            counts.add_driver(driver.available);
        }
        counts.riders = self.world.resource::<RiderRegistry>().len();
        counts.undo_depth = self.undo_depth();
        counts
    }

    pub fn trip_snapshots(&self) -> Vec<TripSnapshot> {
        let graph = self.graph();
        self.trips()
            .into_iter()
            .map(|trip| {
                let rider = self.rider(trip.rider).ok();
                let driver = trip.driver.and_then(|id| self.driver(id).ok());
                TripSnapshot::new(trip, rider, driver, graph)
            })
            .collect()
    }

    /// Every known zone with its name and locations, ascending by zone id.
    pub fn zone_snapshots(&self) -> Vec<ZoneSnapshot> {
        let graph = self.graph();
        graph
            .zones()
            .into_iter()
            .map(|zone| ZoneSnapshot::new(zone, graph))
            .collect()
    }

    pub fn driver_snapshots(&self) -> Vec<DriverSnapshot> {
        let graph = self.graph();
        self.drivers()
            .into_iter()
            .map(|driver| DriverSnapshot::new(driver, graph))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::TripState;
    use crate::test_helpers::{small_city, BOB, EVA};

    #[test]
    fn request_assigns_and_relocates_driver() {
        let mut session = small_city();
        let rider = session.add_rider("Sara", "Mall").expect("rider");

        let trip_id = session
            .request_trip(rider, "Mall", "Airport", None)
            .expect("trip");

        let trip = session.trip(trip_id).expect("trip").clone();
        assert_eq!(trip.state, TripState::Assigned);
        assert_eq!(trip.driver, Some(BOB));
        let driver = session.driver(BOB).expect("driver");
        assert!(!driver.available);
        assert_eq!(Some(driver.location), session.graph().location_id("Mall"));
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.find_active_trip_for(rider).expect("lookup"), Some(trip_id));
    }

    #[test]
    fn custom_policy_keeps_config_and_pricing() {
        let config = DispatchConfig::default().with_zone_penalty(7);
        let mut session = crate::test_helpers::small_city_with_config(config)
            .with_policy(Box::new(crate::matching::FirstAvailablePolicy));
        assert_eq!(session.config(), &config);

        // Eva is second in the fleet; first-available still picks Bob.
        let rider = session.add_rider("Sara", "Airport").expect("rider");
        let trip = session.request_trip(rider, "Airport", "CityCenter", None).expect("trip");
        assert_eq!(session.trip(trip).expect("trip").driver, Some(BOB));
        let fare = session.complete_trip(trip).expect("complete");
        assert!((fare - (150.0 + 25.0 * 30.0)).abs() < 0.01);
    }

    #[test]
    fn route_distance_separates_not_found_from_unreachable() {
        let mut session = small_city();
        session.add_location("Island", ZoneId(9)).expect("island");

        assert_eq!(
            session.route_distance("Mall", "Nowhere"),
            Err(DispatchError::UnknownLocation("Nowhere".into()))
        );
        assert_eq!(
            session.route_distance("Mall", "Island"),
            Err(DispatchError::Unreachable {
                from: "Mall".into(),
                to: "Island".into()
            })
        );
        assert_eq!(session.route_distance("Mall", "Mall"), Ok(0));
        assert_eq!(session.shortest_distance("Mall", "Island"), Distance::Unreachable);
    }

    #[test]
    fn counts_reflect_lifecycle() {
        let mut session = small_city();
        let rider = session.add_rider("Sara", "Mall").expect("rider");
        let trip = session.request_trip(rider, "Mall", "Airport", None).expect("trip");
        session.complete_trip(trip).expect("complete");

        let counts = session.counts();
        assert_eq!(counts.trips_completed, 1);
        assert_eq!(counts.drivers_busy, 0);
        assert_eq!(counts.riders, 1);
        assert_eq!(counts.undo_depth, 2);

        let snapshots = session.trip_snapshots();
        assert_eq!(snapshots[0].pickup, "Mall");
        assert_eq!(snapshots[0].rider_name, "Sara");
        assert!(snapshots[0].fare > 0.0);
    }

    #[test]
    fn bike_driver_is_charged_the_bike_rate() {
        let mut session = small_city();
        let rider = session.add_rider("Omar", "Airport").expect("rider");
        let trip = session
            .request_trip(rider, "Airport", "CityCenter", None)
            .expect("trip");
        assert_eq!(session.trip(trip).expect("trip").driver, Some(EVA));

        let fare = session.complete_trip(trip).expect("complete");
        assert!((fare - 540.0).abs() < 0.01, "fare was {fare}");
        assert_eq!(session.available_drivers().len(), 2);
    }
}
