//! Road network: named locations grouped into zones, joined by undirected
//! weighted roads.
//!
//! Shortest distances are computed fresh on every query with Dijkstra over the
//! adjacency list. Nothing is cached, so a road added between two queries is
//! always visible to the second one.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use bevy_ecs::prelude::Resource;
use pathfinding::prelude::dijkstra;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ecs::{LocationId, ZoneId};
use crate::error::DispatchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub zone: ZoneId,
}

/// One direction of a road. Every road is stored as two edges of equal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    to: LocationId,
    weight: u32,
}

/// Result of a distance query. Unreachable is a distinct state, never a
/// large number, so it cannot leak into arithmetic by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Reachable(u64),
    Unreachable,
}

impl Distance {
    pub fn value(self) -> Option<u64> {
        match self {
            Distance::Reachable(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    /// Collapse to a number, substituting `fallback` when unreachable.
    pub fn or_fallback(self, fallback: u64) -> u64 {
        self.value().unwrap_or(fallback)
    }
}

/// Shortest path between two locations, endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub locations: Vec<LocationId>,
    pub distance: u64,
}

#[derive(Debug, Default, Resource)]
pub struct RoadGraph {
    locations: Vec<Location>,
    by_name: HashMap<String, LocationId>,
    adjacency: Vec<Vec<Edge>>,
    road_count: usize,
    zone_names: BTreeMap<ZoneId, String>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location. Names are the lookup key, so a second location
    /// with the same name is rejected.
    pub fn add_location(&mut self, name: &str, zone: ZoneId) -> Result<LocationId, DispatchError> {
        if self.by_name.contains_key(name) {
            return Err(DispatchError::DuplicateLocation(name.to_string()));
        }
        let id = LocationId(self.locations.len() as u32);
        self.locations.push(Location {
            id,
            name: name.to_string(),
            zone,
        });
        self.by_name.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        debug!(location = name, %zone, "location added");
        Ok(id)
    }

    /// Add an undirected road. Parallel roads between the same pair are kept;
    /// shortest-path queries consider all of them.
    pub fn add_road(&mut self, a: &str, b: &str, weight: u32) -> Result<(), DispatchError> {
        let (id_a, id_b) = match (self.location_id(a), self.location_id(b)) {
            (Some(id_a), Some(id_b)) => (id_a, id_b),
            (None, _) => {
                warn!(from = a, to = b, "road skipped: unknown location {a}");
                return Err(DispatchError::UnknownLocation(a.to_string()));
            }
            (_, None) => {
                warn!(from = a, to = b, "road skipped: unknown location {b}");
                return Err(DispatchError::UnknownLocation(b.to_string()));
            }
        };
        self.adjacency[id_a.0 as usize].push(Edge { to: id_b, weight });
        self.adjacency[id_b.0 as usize].push(Edge { to: id_a, weight });
        self.road_count += 1;
        debug!(from = a, to = b, weight, "road added");
        Ok(())
    }

    /// Attach a display name (a city, a district) to a zone. Renaming a zone
    /// replaces the previous name. Zones need no name to be used.
    pub fn name_zone(&mut self, zone: ZoneId, name: &str) {
        debug!(%zone, name, "zone named");
        self.zone_names.insert(zone, name.to_string());
    }

    pub fn zone_name(&self, zone: ZoneId) -> Option<&str> {
        self.zone_names.get(&zone).map(String::as_str)
    }

    /// Every zone that is named or holds a location, ascending.
    pub fn zones(&self) -> Vec<ZoneId> {
        let zones: BTreeSet<ZoneId> = self
            .locations
            .iter()
            .map(|l| l.zone)
            .chain(self.zone_names.keys().copied())
            .collect();
        zones.into_iter().collect()
    }

    pub fn locations_in_zone(&self, zone: ZoneId) -> Vec<&Location> {
        self.locations.iter().filter(|l| l.zone == zone).collect()
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.by_name.get(name).copied()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0 as usize)
    }

    pub fn name_of(&self, id: LocationId) -> Option<&str> {
        self.location(id).map(|l| l.name.as_str())
    }

    pub fn zone_of(&self, name: &str) -> Option<ZoneId> {
        self.location_id(name)
            .and_then(|id| self.location(id))
            .map(|l| l.zone)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn road_count(&self) -> usize {
        self.road_count
    }

    fn contains(&self, id: LocationId) -> bool {
        (id.0 as usize) < self.locations.len()
    }

    pub fn shortest_route_between(&self, from: LocationId, to: LocationId) -> Option<Route> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(Route {
                locations: vec![from],
                distance: 0,
            });
        }
        dijkstra(
            &from,
            |node: &LocationId| {
                self.adjacency[node.0 as usize]
                    .iter()
                    .map(|edge| (edge.to, u64::from(edge.weight)))
            },
            |node: &LocationId| *node == to,
        )
        .map(|(locations, distance)| Route {
            locations,
            distance,
        })
    }

    pub fn shortest_distance_between(&self, from: LocationId, to: LocationId) -> Distance {
        match self.shortest_route_between(from, to) {
            Some(route) => Distance::Reachable(route.distance),
            None => Distance::Unreachable,
        }
    }

    /// Unknown names are reported as [`Distance::Unreachable`], the same as a
    /// missing path.
    pub fn shortest_distance(&self, from: &str, to: &str) -> Distance {
        match (self.location_id(from), self.location_id(to)) {
            (Some(a), Some(b)) => self.shortest_distance_between(a, b),
            _ => Distance::Unreachable,
        }
    }

    pub fn shortest_route(&self, from: &str, to: &str) -> Option<Route> {
        let a = self.location_id(from)?;
        let b = self.location_id(to)?;
        self.shortest_route_between(a, b)
    }
}
