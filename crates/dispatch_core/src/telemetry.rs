//! Read-only views of session state for the presentation layer.
//!
//! Snapshots resolve ids to names so that a caller can render receipts and
//! tables without reaching back into the world.

use serde::Serialize;

use crate::ecs::{Driver, DriverId, LocationId, Rider, RiderId, Trip, TripId, TripState, ZoneId};
use crate::graph::RoadGraph;

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionCounts {
    pub trips_requested: usize,
    pub trips_assigned: usize,
    pub trips_ongoing: usize,
    pub trips_completed: usize,
    pub trips_cancelled: usize,
    pub drivers_available: usize,
    pub drivers_busy: usize,
    pub riders: usize,
    pub undo_depth: usize,
}

impl SessionCounts {
    pub fn add_trip(&mut self, state: TripState) {
        match state {
            TripState::Requested => self.trips_requested += 1,
            TripState::Assigned => self.trips_assigned += 1,
            TripState::Ongoing => self.trips_ongoing += 1,
            TripState::Completed => self.trips_completed += 1,
            TripState::Cancelled => self.trips_cancelled += 1,
        }
    }

    pub fn add_driver(&mut self, available: bool) {
        if available {
            self.drivers_available += 1;
        } else {
            self.drivers_busy += 1;
        }
    }

    pub fn total_trips(&self) -> usize {
        self.trips_requested
            + self.trips_assigned
            + self.trips_ongoing
            + self.trips_completed
            + self.trips_cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSnapshot {
    pub id: DriverId,
    pub name: String,
    pub model: String,
    pub plate: String,
    pub location: String,
    pub zone: u32,
    pub available: bool,
}

impl DriverSnapshot {
    pub fn new(driver: &Driver, graph: &RoadGraph) -> Self {
        Self {
            id: driver.id,
            name: driver.name.clone(),
            model: driver.vehicle.model.clone(),
            plate: driver.vehicle.plate.clone(),
            location: location_name(graph, driver.location),
            zone: driver.zone.0,
            available: driver.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSnapshot {
    pub id: TripId,
    pub rider: RiderId,
    pub rider_name: String,
    pub driver: Option<DriverId>,
    pub driver_name: Option<String>,
    pub pickup: String,
    pub dropoff: String,
    pub state: TripState,
    pub fare: f64,
}

impl TripSnapshot {
    pub fn new(trip: &Trip, rider: Option<&Rider>, driver: Option<&Driver>, graph: &RoadGraph) -> Self {
        Self {
            id: trip.id,
            rider: trip.rider,
            rider_name: rider.map(|r| r.name.clone()).unwrap_or_default(),
            driver: trip.driver,
            driver_name: driver.map(|d| d.name.clone()),
            pickup: location_name(graph, trip.pickup),
            dropoff: location_name(graph, trip.dropoff),
            state: trip.state,
            fare: trip.fare,
        }
    }
}

/// A zone with its display name and the locations it groups, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneSnapshot {
    pub zone: u32,
    pub name: Option<String>,
    pub locations: Vec<String>,
}

impl ZoneSnapshot {
    pub fn new(zone: ZoneId, graph: &RoadGraph) -> Self {
        Self {
            zone: zone.0,
            name: graph.zone_name(zone).map(str::to_string),
            locations: graph
                .locations_in_zone(zone)
                .into_iter()
                .map(|l| l.name.clone())
                .collect(),
        }
    }
}

fn location_name(graph: &RoadGraph, id: LocationId) -> String {
    graph.name_of(id).unwrap_or_default().to_string()
}
