//! Walk through the demo city: book, start, complete, cancel and undo trips,
//! printing the ledger after each step.
//!
//! Run with: cargo run -p dispatch_core --example demo_city
//! Set RUST_LOG=dispatch_core=debug to see dispatch costs.

use dispatch_core::config::DispatchConfig;
use dispatch_core::scenario::{build_session, CitySeed};
use dispatch_core::{DispatchError, DispatchSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_status(session: &DispatchSession) {
    println!("ID | Rider      | Route                       | Status     | Driver           | Fare");
    println!("---+------------+-----------------------------+------------+------------------+--------");
    for trip in session.trip_snapshots() {
        println!(
            "{:>2} | {:<10} | {:<12} -> {:<12} | {:<10} | {:<16} | {:>6.1}",
            trip.id.0,
            trip.rider_name,
            trip.pickup,
            trip.dropoff,
            trip.state.as_str(),
            trip.driver_name.as_deref().unwrap_or("Unassigned"),
            trip.fare,
        );
    }
    let counts = session.counts();
    println!(
        "drivers available: {}  busy: {}  undo depth: {}\n",
        counts.drivers_available, counts.drivers_busy, counts.undo_depth
    );
}

fn main() -> Result<(), DispatchError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dispatch_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut session = build_session(&CitySeed::demo(), DispatchConfig::default())?;

    println!("--- Zones ---");
    for zone in session.zone_snapshots() {
        println!(
            "{:>2}. {:<10} {}",
            zone.zone,
            zone.name.as_deref().unwrap_or("-"),
            zone.locations.join(", ")
        );
    }
    println!();

    println!("--- Available drivers ---");
    for driver in session.driver_snapshots() {
        println!(
            "{:<16} {} ({}) at {} [zone {}]",
            driver.name, driver.model, driver.plate, driver.location, driver.zone
        );
    }
    println!();

    let ayesha = session.add_rider("Ayesha", "University")?;
    let bilal = session.add_rider("Bilal", "Suburb")?;
    let hamza = session.add_rider("Hamza", "RailwayStation")?;

    let first = session.request_trip(ayesha, "University", "Airport", None)?;
    let second = session.request_trip(bilal, "Suburb", "CityCenter", None)?;
    print_status(&session);

    session.start_trip(first)?;
    let fare = session.complete_trip(first)?;
    println!("Trip #{} completed, fare {fare:.1}", first.0);
    session.cancel_trip(second)?;
    print_status(&session);

    let undone = session.undo_last_action()?;
    println!("Undo restored trip #{} to {}", undone.trip.0, undone.restored);
    print_status(&session);

    let charlie = session
        .available_drivers()
        .into_iter()
        .find(|d| d.name == "Driver Charlie")
        .map(|d| d.id);
    let third = session.request_trip(hamza, "RailwayStation", "TechPark", charlie)?;
    let fare = session.complete_trip(third)?;
    println!("Bike trip #{} completed, fare {fare:.1}", third.0);
    print_status(&session);

    if let Err(err) = session.cancel_trip(third) {
        println!("Cancelling a completed trip is rejected: {err}");
    }

    let totals = session.counts();
    println!(
        "Total trips: {}  Total drivers: {}",
        totals.total_trips(),
        session.drivers().len()
    );
    Ok(())
}
