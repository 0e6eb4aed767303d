mod support;

use dispatch_core::config::{DispatchConfig, DispatchPolicyKind, UNREACHABLE_COST};
use dispatch_core::ecs::{DriverId, TripState, ZoneId};
use dispatch_core::matching::{DispatchPolicy, DriverCandidate, NearestDriverPolicy};
use dispatch_core::scenario::{build_session, CitySeed};
use dispatch_core::{DispatchError, DispatchSession, ErrorKind};
use support::{book, penalty_line, zoned_triangle, LOCAL, NEARBY, STRANDED};

#[test]
fn in_zone_driver_wins_over_penalised_driver() {
    let mut session = zoned_triangle();
    let graph = session.graph();
    let pickup = graph.location_id("B").expect("B");
    let policy = NearestDriverPolicy::default();
    let d1 = DriverCandidate {
        driver: DriverId(0),
        location: graph.location_id("A").expect("A"),
        zone: ZoneId(1),
        available: true,
    };
    assert_eq!(policy.cost(graph, &d1, pickup, ZoneId(2)), 55);

    let (_, trip) = book(&mut session, "Rider", "B", "A");
    assert_eq!(session.trip(trip).expect("trip").driver, Some(DriverId(1)));
}

#[test]
fn closer_in_zone_driver_wins_for_any_penalty() {
    let mut session = zoned_triangle();
    let candidates = dispatch_core::fleet::dispatch_candidates(session.world());
    let chosen = NearestDriverPolicy::new(500, UNREACHABLE_COST)
        .find_match(session.graph(), &candidates, "B")
        .expect("match");
    assert_eq!(chosen.driver, DriverId(1));

    // With no penalty D2 (4) still beats D1 (5).
    let chosen = NearestDriverPolicy::new(0, UNREACHABLE_COST)
        .find_match(session.graph(), &candidates, "B")
        .expect("match");
    assert_eq!(chosen.driver, DriverId(1));

    let (_, trip) = book(&mut session, "Rider", "A", "B");
    assert_eq!(session.trip(trip).expect("trip").driver, Some(DriverId(0)));
}

#[test]
fn dispatch_never_picks_a_busy_driver() {
    let mut session = zoned_triangle();
    let (_, first) = book(&mut session, "First", "B", "A");
    let (_, second) = book(&mut session, "Second", "B", "A");
    let (_, third) = book(&mut session, "Third", "B", "A");

    assert_eq!(session.trip(first).expect("first").driver, Some(DriverId(1)));
    assert_eq!(session.trip(second).expect("second").driver, Some(DriverId(0)));

    let third = session.trip(third).expect("third");
    assert_eq!(third.state, TripState::Requested);
    assert_eq!(third.driver, None);
    assert!(session.available_drivers().is_empty());
}

#[test]
fn empty_fleet_leaves_trip_requested() {
    let mut session = DispatchSession::default();
    session.add_location("A", ZoneId(1)).expect("A");
    session.add_location("B", ZoneId(1)).expect("B");
    let rider = session.add_rider("Lonely", "A").expect("rider");

    let trip = session.request_trip(rider, "A", "B", None).expect("trip");

    let trip = session.trip(trip).expect("trip");
    assert_eq!(trip.state, TripState::Requested);
    assert!(trip.driver.is_none());
    assert_eq!(session.trips().len(), 1);
    assert_eq!(session.undo_depth(), 1);
}

#[test]
fn unreachable_driver_is_used_when_nobody_else_exists() {
    let mut session = DispatchSession::default();
    session.add_location("Here", ZoneId(1)).expect("Here");
    session.add_location("There", ZoneId(1)).expect("There");
    session.add_location("Island", ZoneId(1)).expect("Island");
    session.add_road("Here", "There", 3).expect("road");
    session.add_driver("Stranded", None, None, "Island", ZoneId(1)).expect("driver");

    let (_, trip) = book(&mut session, "Rider", "Here", "There");

    let trip = session.trip(trip).expect("trip");
    assert_eq!(trip.state, TripState::Assigned);
    assert_eq!(trip.driver, Some(DriverId(0)));
}

#[test]
fn manual_driver_bypasses_policy() {
    let mut session = zoned_triangle();
    let rider = session.add_rider("Picky", "B").expect("rider");

    let trip = session
        .request_trip(rider, "B", "A", Some(DriverId(0)))
        .expect("trip");

    let trip = session.trip(trip).expect("trip");
    assert_eq!(trip.driver, Some(DriverId(0)));
    let d1 = session.driver(DriverId(0)).expect("d1");
    assert!(!d1.available);
    assert_eq!(d1.zone, ZoneId(2), "zone follows the relocation to the pickup");
}

#[test]
fn manual_driver_must_exist_and_be_available() {
    let mut session = zoned_triangle();
    let rider = session.add_rider("Picky", "B").expect("rider");
    session
        .request_trip(rider, "B", "A", Some(DriverId(1)))
        .expect("first");

    let err = session
        .request_trip(rider, "B", "A", Some(DriverId(1)))
        .expect_err("busy");
    assert_eq!(err, DispatchError::DriverUnavailable(DriverId(1)));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    let err = session
        .request_trip(rider, "B", "A", Some(DriverId(42)))
        .expect_err("unknown");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(session.trips().len(), 1, "rejected requests create no trip");
}

#[test]
fn unknown_locations_and_riders_are_not_found() {
    let mut session = zoned_triangle();
    let rider = session.add_rider("Lost", "A").expect("rider");

    let err = session.request_trip(rider, "Nowhere", "A", None).expect_err("pickup");
    assert_eq!(err, DispatchError::UnknownLocation("Nowhere".into()));
    let err = session
        .request_trip(dispatch_core::ecs::RiderId(99), "A", "B", None)
        .expect_err("rider");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(session.undo_depth(), 0);
}

#[test]
fn first_available_policy_ignores_distance() {
    let config = DispatchConfig::default().with_policy(DispatchPolicyKind::FirstAvailable);
    let seed = CitySeed::default()
        .with_location("A", 1)
        .with_location("B", 2)
        .with_location("C", 2)
        .with_road("A", "B", 5)
        .with_road("A", "C", 3)
        .with_road("C", "B", 4)
        .with_driver("D1", None, "A", 1)
        .with_driver("D2", None, "C", 2);
    let mut session = build_session(&seed, config).expect("session");

    let (_, trip) = book(&mut session, "Rider", "B", "A");
    assert_eq!(session.trip(trip).expect("trip").driver, Some(DriverId(0)));
}

#[test]
fn custom_policy_can_be_installed() {
    struct LastAvailable;
    impl DispatchPolicy for LastAvailable {
        fn find_match(
            &self,
            _graph: &dispatch_core::graph::RoadGraph,
            candidates: &[DriverCandidate],
            _pickup: &str,
        ) -> Option<dispatch_core::matching::DispatchMatch> {
            candidates
                .iter()
                .rev()
                .find(|c| c.available)
                .map(|c| dispatch_core::matching::DispatchMatch { driver: c.driver, cost: 0 })
        }
    }

    let mut session = zoned_triangle().with_policy(Box::new(LastAvailable));
    let (_, trip) = book(&mut session, "Rider", "A", "B");
    assert_eq!(session.trip(trip).expect("trip").driver, Some(DriverId(1)));
}

fn assigned_driver(config: DispatchConfig) -> Option<DriverId> {
    let mut session = penalty_line(config);
    let (_, trip) = book(&mut session, "Rider", "P", "Far");
    session.trip(trip).expect("trip").driver
}

#[test]
fn default_zone_penalty_favours_in_zone_driver() {
    // Nearby costs 2 + 50, Local costs 30.
    assert_eq!(assigned_driver(DispatchConfig::default()), Some(LOCAL));
}

#[test]
fn configured_zone_penalty_reaches_session_policy() {
    assert_eq!(
        assigned_driver(DispatchConfig::default().with_zone_penalty(0)),
        Some(NEARBY)
    );
    // 2 + 20 still beats 30.
    assert_eq!(
        assigned_driver(DispatchConfig::default().with_zone_penalty(20)),
        Some(NEARBY)
    );
    // 2 + 28 ties with 30; the earlier driver in fleet order keeps it.
    assert_eq!(
        assigned_driver(DispatchConfig::default().with_zone_penalty(28)),
        Some(NEARBY)
    );
    assert_eq!(
        assigned_driver(DispatchConfig::default().with_zone_penalty(29)),
        Some(LOCAL)
    );
}

#[test]
fn configured_unreachable_cost_reaches_session_policy() {
    let cheap_unreachable = DispatchConfig::default()
        .with_zone_penalty(0)
        .with_unreachable_cost(1);
    assert_eq!(assigned_driver(cheap_unreachable), Some(STRANDED));

    let config = DispatchConfig::default().with_zone_penalty(0);
    assert_eq!(assigned_driver(config), Some(NEARBY));
}
