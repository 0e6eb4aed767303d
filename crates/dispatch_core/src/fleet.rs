//! Driver registry.
//!
//! Drivers live as entities in the session world; [`FleetDirectory`] keeps
//! their entities in registration order, which is also the order dispatch
//! policies see them in.

use bevy_ecs::prelude::{Entity, Mut, Resource, World};
use tracing::debug;

use crate::ecs::{Driver, DriverId, LocationId, Vehicle, ZoneId};
use crate::error::DispatchError;
use crate::graph::RoadGraph;
use crate::matching::DriverCandidate;

#[derive(Debug, Default, Resource)]
pub struct FleetDirectory {
    drivers: Vec<Entity>,
}

impl FleetDirectory {
    pub fn entity(&self, id: DriverId) -> Option<Entity> {
        self.drivers.get(id.0 as usize).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = DriverId> + '_ {
        (0..self.drivers.len()).map(|i| DriverId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    fn next_id(&self) -> DriverId {
        DriverId(self.drivers.len() as u32)
    }
}

/// Spawn a driver at a known location. New drivers start available.
pub fn spawn_driver(
    world: &mut World,
    name: &str,
    vehicle: Vehicle,
    location: &str,
    zone: ZoneId,
) -> Result<DriverId, DispatchError> {
    let location_id = world
        .resource::<RoadGraph>()
        .location_id(location)
        .ok_or_else(|| DispatchError::UnknownLocation(location.to_string()))?;
    let id = world.resource::<FleetDirectory>().next_id();
    let entity = world
        .spawn(Driver {
            id,
            name: name.to_string(),
            vehicle,
            location: location_id,
            zone,
            available: true,
        })
        .id();
    world.resource_mut::<FleetDirectory>().drivers.push(entity);
    debug!(driver = %id, name, location, %zone, "driver registered");
    Ok(id)
}

pub fn driver(world: &World, id: DriverId) -> Result<&Driver, DispatchError> {
    world
        .resource::<FleetDirectory>()
        .entity(id)
        .and_then(|entity| world.get::<Driver>(entity))
        .ok_or(DispatchError::UnknownDriver(id))
}

pub fn driver_mut(world: &mut World, id: DriverId) -> Result<Mut<'_, Driver>, DispatchError> {
    let entity = world
        .resource::<FleetDirectory>()
        .entity(id)
        .ok_or(DispatchError::UnknownDriver(id))?;
    world
        .get_mut::<Driver>(entity)
        .ok_or(DispatchError::UnknownDriver(id))
}

/// Every driver in registration order, available or not.
pub fn drivers(world: &World) -> Vec<&Driver> {
    let fleet = world.resource::<FleetDirectory>();
    fleet
        .ids()
        .filter_map(|id| fleet.entity(id))
        .filter_map(|entity| world.get::<Driver>(entity))
        .collect()
}

pub fn dispatch_candidates(world: &World) -> Vec<DriverCandidate> {
    drivers(world)
        .into_iter()
        .map(|d| DriverCandidate {
            driver: d.id,
            location: d.location,
            zone: d.zone,
            available: d.available,
        })
        .collect()
}

pub fn set_available(world: &mut World, id: DriverId, available: bool) -> Result<(), DispatchError> {
    driver_mut(world, id)?.available = available;
    Ok(())
}

/// Move a driver; their zone follows the new location.
pub fn relocate(world: &mut World, id: DriverId, location: LocationId) -> Result<(), DispatchError> {
    let zone = world
        .resource::<RoadGraph>()
        .location(location)
        .map(|l| l.zone)
        .ok_or_else(|| DispatchError::UnknownLocation(format!("{location:?}")))?;
    let mut driver = driver_mut(world, id)?;
    driver.location = location;
    driver.zone = zone;
    Ok(())
}
