//! Trip ledger and lifecycle.
//!
//! ```text
//! REQUESTED ──► ASSIGNED ──► ONGOING ──► COMPLETED
//!     │             │  └──────────────────────▲
//!     └─────────────┴──► CANCELLED
//! ```
//!
//! Every mutating operation validates first, then hands the trip's current
//! state to the [`RollbackManager`], and only then applies its change. A
//! rejected call therefore leaves no undo entry behind.

use bevy_ecs::prelude::{Entity, Mut, Resource, World};
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::ecs::{DriverId, LocationId, RiderId, Trip, TripId, TripState};
use crate::error::DispatchError;
use crate::fleet;
use crate::graph::RoadGraph;
use crate::matching::{DispatchPolicy, DispatchPolicyResource};
use crate::riders;
use crate::rollback::RollbackManager;

#[derive(Debug, Default, Resource)]
pub struct TripLedger {
    trips: Vec<Entity>,
}

impl TripLedger {
    pub fn entity(&self, id: TripId) -> Option<Entity> {
        self.trips.get(id.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

pub fn trip(world: &World, id: TripId) -> Result<&Trip, DispatchError> {
    world
        .resource::<TripLedger>()
        .entity(id)
        .and_then(|entity| world.get::<Trip>(entity))
        .ok_or(DispatchError::UnknownTrip(id))
}

pub fn trip_mut(world: &mut World, id: TripId) -> Result<Mut<'_, Trip>, DispatchError> {
    let entity = world
        .resource::<TripLedger>()
        .entity(id)
        .ok_or(DispatchError::UnknownTrip(id))?;
    world
        .get_mut::<Trip>(entity)
        .ok_or(DispatchError::UnknownTrip(id))
}

/// All trips in booking order.
pub fn trips(world: &World) -> Vec<&Trip> {
    world
        .resource::<TripLedger>()
        .trips
        .iter()
        .filter_map(|entity| world.get::<Trip>(*entity))
        .collect()
}

fn check_transition(trip: &Trip, next: TripState) -> Result<(), DispatchError> {
    if trip.state.can_transition_to(next) {
        Ok(())
    } else {
        Err(DispatchError::InvalidTransition {
            trip: trip.id,
            from: trip.state,
            to: next,
        })
    }
}

fn record_state(world: &mut World, id: TripId) -> Result<(), DispatchError> {
    let snapshot = trip(world, id)?.clone();
    world.resource_mut::<RollbackManager>().record_state(&snapshot);
    Ok(())
}

fn resolve(world: &World, name: &str) -> Result<LocationId, DispatchError> {
    world
        .resource::<RoadGraph>()
        .location_id(name)
        .ok_or_else(|| DispatchError::UnknownLocation(name.to_string()))
}

/// Book a trip and try to assign a driver.
///
/// With `manual_driver` the dispatch policy is skipped and that driver is used
/// as long as they are available. Otherwise the session's policy picks one.
/// When nobody can be matched the trip is still created and stays REQUESTED.
///
/// The rider is placed at the pickup point. The assigned driver is reserved and
/// moved there immediately.
pub fn request_trip(
    world: &mut World,
    rider: RiderId,
    pickup: &str,
    dropoff: &str,
    manual_driver: Option<DriverId>,
) -> Result<TripId, DispatchError> {
    if riders::rider(world, rider)?.name.trim().is_empty() {
        return Err(DispatchError::EmptyRiderName);
    }
    let pickup_id = resolve(world, pickup)?;
    let dropoff_id = resolve(world, dropoff)?;
    if let Some(driver_id) = manual_driver {
        if !fleet::driver(world, driver_id)?.available {
            return Err(DispatchError::DriverUnavailable(driver_id));
        }
    }

    riders::rider_mut(world, rider)?.location = pickup_id;

    let id = TripId(world.resource::<TripLedger>().len() as u32);
    let entity = world.spawn(Trip::new(id, rider, pickup_id, dropoff_id)).id();
    world.resource_mut::<TripLedger>().trips.push(entity);
    record_state(world, id)?;

    let chosen = match manual_driver {
        Some(driver_id) => Some(driver_id),
        None => {
            let candidates = fleet::dispatch_candidates(world);
            let policy = world.resource::<DispatchPolicyResource>();
            policy
                .find_match(world.resource::<RoadGraph>(), &candidates, pickup)
                .map(|m| m.driver)
        }
    };

    match chosen {
        Some(driver_id) => {
            {
                let mut trip = trip_mut(world, id)?;
                trip.driver = Some(driver_id);
                trip.state = TripState::Assigned;
            }
            fleet::set_available(world, driver_id, false)?;
            fleet::relocate(world, driver_id, pickup_id)?;
            info!(trip = %id, %rider, driver = %driver_id, pickup, dropoff, "trip assigned");
        }
        None => {
            warn!(trip = %id, %rider, pickup, dropoff, "no available driver, trip left requested");
        }
    }
    Ok(id)
}

/// ASSIGNED → ONGOING.
pub fn start_trip(world: &mut World, id: TripId) -> Result<(), DispatchError> {
    check_transition(trip(world, id)?, TripState::Ongoing)?;
    record_state(world, id)?;
    trip_mut(world, id)?.state = TripState::Ongoing;
    info!(trip = %id, "trip started");
    Ok(())
}

/// Close the trip, charge the fare and free the driver at the dropoff point.
/// Returns the fare.
pub fn complete_trip(world: &mut World, id: TripId) -> Result<f64, DispatchError> {
    let (pickup, dropoff, driver_id) = {
        let trip = trip(world, id)?;
        check_transition(trip, TripState::Completed)?;
        (trip.pickup, trip.dropoff, trip.driver)
    };
    let vehicle = match driver_id {
        Some(driver_id) => Some(fleet::driver(world, driver_id)?.vehicle.clone()),
        None => None,
    };
    let fare = world.resource::<DispatchConfig>().pricing.trip_fare(
        world.resource::<RoadGraph>(),
        pickup,
        dropoff,
        vehicle.as_ref(),
    );

    record_state(world, id)?;
    {
        let mut trip = trip_mut(world, id)?;
        trip.state = TripState::Completed;
        trip.fare = fare;
    }
    if let Some(driver_id) = driver_id {
        fleet::set_available(world, driver_id, true)?;
        fleet::relocate(world, driver_id, dropoff)?;
    }
    info!(trip = %id, fare, "trip completed");
    Ok(fare)
}

/// Cancel a trip that has not started. The driver, if any, becomes available
/// where they stand; the trip keeps its driver reference for undo.
pub fn cancel_trip(world: &mut World, id: TripId) -> Result<(), DispatchError> {
    let driver_id = {
        let trip = trip(world, id)?;
        check_transition(trip, TripState::Cancelled)?;
        trip.driver
    };
    record_state(world, id)?;
    trip_mut(world, id)?.state = TripState::Cancelled;
    if let Some(driver_id) = driver_id {
        fleet::set_available(world, driver_id, true)?;
    }
    info!(trip = %id, "trip cancelled");
    Ok(())
}

/// Most recent trip of `rider` that is not yet terminal.
pub fn find_active_trip_for(world: &World, rider: RiderId) -> Result<Option<TripId>, DispatchError> {
    riders::rider(world, rider)?;
    Ok(trips(world)
        .into_iter()
        .rev()
        .find(|t| t.rider == rider && t.state.is_active())
        .map(|t| t.id))
}
