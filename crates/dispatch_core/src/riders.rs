use bevy_ecs::prelude::{Entity, Mut, Resource, World};
use tracing::debug;

use crate::ecs::{Rider, RiderId};
use crate::error::DispatchError;
use crate::graph::RoadGraph;

#[derive(Debug, Default, Resource)]
pub struct RiderRegistry {
    riders: Vec<Entity>,
}

impl RiderRegistry {
    pub fn entity(&self, id: RiderId) -> Option<Entity> {
        self.riders.get(id.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }
}

pub fn spawn_rider(world: &mut World, name: &str, location: &str) -> Result<RiderId, DispatchError> {
    if name.trim().is_empty() {
        return Err(DispatchError::EmptyRiderName);
    }
    let location_id = world
        .resource::<RoadGraph>()
        .location_id(location)
        .ok_or_else(|| DispatchError::UnknownLocation(location.to_string()))?;
    let id = RiderId(world.resource::<RiderRegistry>().len() as u32);
    let entity = world
        .spawn(Rider {
            id,
            name: name.to_string(),
            location: location_id,
        })
        .id();
    world.resource_mut::<RiderRegistry>().riders.push(entity);
    debug!(rider = %id, name, location, "rider registered");
    Ok(id)
}

pub fn rider(world: &World, id: RiderId) -> Result<&Rider, DispatchError> {
    world
        .resource::<RiderRegistry>()
        .entity(id)
        .and_then(|entity| world.get::<Rider>(entity))
        .ok_or(DispatchError::UnknownRider(id))
}

pub fn rider_mut(world: &mut World, id: RiderId) -> Result<Mut<'_, Rider>, DispatchError> {
    let entity = world
        .resource::<RiderRegistry>()
        .entity(id)
        .ok_or(DispatchError::UnknownRider(id))?;
    world
        .get_mut::<Rider>(entity)
        .ok_or(DispatchError::UnknownRider(id))
}

pub fn riders(world: &World) -> Vec<&Rider> {
    let registry = world.resource::<RiderRegistry>();
    registry
        .riders
        .iter()
        .filter_map(|entity| world.get::<Rider>(*entity))
        .collect()
}
