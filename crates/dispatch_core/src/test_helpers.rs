//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests and benches build the same
//! small network.

use crate::config::DispatchConfig;
use crate::ecs::{DriverId, ZoneId};
use crate::session::DispatchSession;

/// Four locations over three zones:
///
/// ```text
/// University(2) ─5─ Mall(1) ─8─ CityCenter(1) ─25─ Airport(3)
/// ```
///
/// Bob (sedan) waits at CityCenter, Eva (bike) at the Airport.
pub fn small_city() -> DispatchSession {
    small_city_with_config(DispatchConfig::default())
}

pub fn small_city_with_config(config: DispatchConfig) -> DispatchSession {
    let mut session = DispatchSession::new(config);
    session.add_location("Mall", ZoneId(1)).expect("Mall");
    session.add_location("CityCenter", ZoneId(1)).expect("CityCenter");
    session.add_location("University", ZoneId(2)).expect("University");
    session.add_location("Airport", ZoneId(3)).expect("Airport");
    session.add_road("Mall", "CityCenter", 8).expect("Mall-CityCenter");
    session.add_road("Mall", "University", 5).expect("Mall-University");
    session.add_road("CityCenter", "Airport", 25).expect("CityCenter-Airport");
    session
        .add_driver("Bob", Some("Corolla"), Some("LEA-1234"), "CityCenter", ZoneId(1))
        .expect("Bob");
    session
        .add_driver("Eva", Some("Honda Bike"), Some("KHI-77"), "Airport", ZoneId(3))
        .expect("Eva");
    session
}

pub const BOB: DriverId = DriverId(0);
pub const EVA: DriverId = DriverId(1);
