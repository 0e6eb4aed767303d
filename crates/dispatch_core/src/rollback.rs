//! Single-step, last-in-first-out undo of trip mutations.
//!
//! Each mutating ledger operation pushes an [`UndoEntry`] before it changes
//! anything. Undo pops the newest entry and restores the trip together with
//! the availability of the driver involved, so trip and fleet never disagree.

use bevy_ecs::prelude::{Resource, World};
use tracing::{info, warn};

use crate::ecs::{DriverId, Trip, TripId, TripState};
use crate::error::DispatchError;
use crate::fleet;
use crate::ledger;

/// Trip state captured immediately before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub trip: TripId,
    pub state: TripState,
    pub driver: Option<DriverId>,
    pub fare: f64,
}

/// What an undo restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoOutcome {
    pub trip: TripId,
    pub restored: TripState,
    pub driver: Option<DriverId>,
}

#[derive(Debug, Default, Resource)]
pub struct RollbackManager {
    stack: Vec<UndoEntry>,
}

impl RollbackManager {
    pub fn record_state(&mut self, trip: &Trip) {
        self.stack.push(UndoEntry {
            trip: trip.id,
            state: trip.state,
            driver: trip.driver,
            fare: trip.fare,
        });
    }

    pub fn peek(&self) -> Option<&UndoEntry> {
        self.stack.last()
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Reverse the most recent trip mutation.
///
/// - Back to REQUESTED: the trip's current driver is released and detached.
/// - Back to ASSIGNED, ONGOING or CANCELLED: the captured driver is attached
///   again and reserved, even if they were freed in between.
/// - Anything else restores the state field only.
///
/// Every reference is checked before the entry is consumed, so the undo either
/// applies completely or not at all.
pub fn undo_last_operation(world: &mut World) -> Result<UndoOutcome, DispatchError> {
    let Some(entry) = world.resource::<RollbackManager>().peek().cloned() else {
        warn!("undo requested with an empty history");
        return Err(DispatchError::NothingToUndo);
    };

    let current_driver = ledger::trip(world, entry.trip)?.driver;
    for driver_id in [current_driver, entry.driver].into_iter().flatten() {
        fleet::driver(world, driver_id)?;
    }
    world.resource_mut::<RollbackManager>().pop();

    let (driver, release, reserve) = match entry.state {
        TripState::Requested => (None, current_driver, None),
        TripState::Assigned | TripState::Ongoing | TripState::Cancelled
            if entry.driver.is_some() =>
        {
            (entry.driver, None, entry.driver)
        }
        _ => (current_driver, None, None),
    };

    {
        let mut trip = ledger::trip_mut(world, entry.trip)?;
        trip.state = entry.state;
        trip.fare = entry.fare;
        trip.driver = driver;
    }
    if let Some(driver_id) = release {
        fleet::set_available(world, driver_id, true)?;
    }
    if let Some(driver_id) = reserve {
        fleet::set_available(world, driver_id, false)?;
    }

    info!(trip = %entry.trip, restored = %entry.state, "undo applied");
    Ok(UndoOutcome {
        trip: entry.trip,
        restored: entry.state,
        driver,
    })
}
