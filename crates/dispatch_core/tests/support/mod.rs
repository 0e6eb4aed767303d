#![allow(dead_code)]

use dispatch_core::config::DispatchConfig;
use dispatch_core::ecs::{DriverId, RiderId, TripId, TripState, ZoneId};
use dispatch_core::DispatchSession;

/// A(zone 1) ─5─ B(zone 2), A ─3─ C(zone 2), C ─4─ B.
/// D1 waits at A in zone 1, D2 at C in zone 2.
pub fn zoned_triangle() -> DispatchSession {
    let mut session = DispatchSession::default();
    session.add_location("A", ZoneId(1)).expect("A");
    session.add_location("B", ZoneId(2)).expect("B");
    session.add_location("C", ZoneId(2)).expect("C");
    session.add_road("A", "B", 5).expect("A-B");
    session.add_road("A", "C", 3).expect("A-C");
    session.add_road("C", "B", 4).expect("C-B");
    session.add_driver("D1", None, None, "A", ZoneId(1)).expect("D1");
    session.add_driver("D2", None, None, "C", ZoneId(2)).expect("D2");
    session
}

/// Pickup `P` in zone 1 with two candidate drivers:
///
/// ```text
/// Near(zone 2) ─2─ P(zone 1) ─30─ Far(zone 1)        Island(zone 1)
/// ```
///
/// "Nearby" (DriverId 0) waits at Near, "Local" (DriverId 1) at Far and
/// "Stranded" (DriverId 2) on the unconnected Island. Which one wins depends
/// only on the configured zone penalty and unreachable cost.
pub fn penalty_line(config: DispatchConfig) -> DispatchSession {
    let mut session = DispatchSession::new(config);
    session.add_location("P", ZoneId(1)).expect("P");
    session.add_location("Near", ZoneId(2)).expect("Near");
    session.add_location("Far", ZoneId(1)).expect("Far");
    session.add_location("Island", ZoneId(1)).expect("Island");
    session.add_road("P", "Near", 2).expect("P-Near");
    session.add_road("P", "Far", 30).expect("P-Far");
    session.add_driver("Nearby", None, None, "Near", ZoneId(2)).expect("Nearby");
    session.add_driver("Local", None, None, "Far", ZoneId(1)).expect("Local");
    session.add_driver("Stranded", None, None, "Island", ZoneId(1)).expect("Stranded");
    session
}

pub const NEARBY: DriverId = DriverId(0);
pub const LOCAL: DriverId = DriverId(1);
pub const STRANDED: DriverId = DriverId(2);

/// Two locations ten units apart with one driver of the given model at `P`.
pub fn ten_unit_route(model: &str) -> DispatchSession {
    ten_unit_route_with_config(model, DispatchConfig::default())
}

pub fn ten_unit_route_with_config(model: &str, config: DispatchConfig) -> DispatchSession {
    let mut session = DispatchSession::new(config);
    session.add_location("P", ZoneId(1)).expect("P");
    session.add_location("Q", ZoneId(1)).expect("Q");
    session.add_road("P", "Q", 10).expect("P-Q");
    session
        .add_driver("Solo", Some(model), Some("ABC-1"), "P", ZoneId(1))
        .expect("driver");
    session
}

pub fn book(session: &mut DispatchSession, name: &str, pickup: &str, dropoff: &str) -> (RiderId, TripId) {
    let rider = session.add_rider(name, pickup).expect("rider");
    let trip = session
        .request_trip(rider, pickup, dropoff, None)
        .expect("trip");
    (rider, trip)
}

/// Everything undo has to restore for one trip and one driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Observed {
    pub state: TripState,
    pub driver: Option<DriverId>,
    pub fare: f64,
    pub availability: Vec<bool>,
}

pub fn observe(session: &DispatchSession, trip: TripId) -> Observed {
    let trip = session.trip(trip).expect("trip");
    Observed {
        state: trip.state,
        driver: trip.driver,
        fare: trip.fare,
        availability: session.drivers().iter().map(|d| d.available).collect(),
    }
}
