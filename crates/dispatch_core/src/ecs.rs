use std::fmt;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Index of a location in the [`RoadGraph`](crate::graph::RoadGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

/// Coarse partition a location belongs to. Only used for the dispatch penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RiderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for RiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleClass {
    Car,
    Bike,
}

/// Vehicle descriptor. Both fields are free text supplied at fleet setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub model: String,
    pub plate: String,
}

impl Vehicle {
    pub const DEFAULT_MODEL: &'static str = "Sedan";
    pub const DEFAULT_PLATE: &'static str = "UNREGISTERED";

    pub fn new(model: Option<&str>, plate: Option<&str>) -> Self {
        Self {
            model: model.unwrap_or(Self::DEFAULT_MODEL).to_string(),
            plate: plate.unwrap_or(Self::DEFAULT_PLATE).to_string(),
        }
    }

    /// Any model whose name mentions "bike" (case-insensitive) is bike-class.
    pub fn class(&self) -> VehicleClass {
        if self.model.to_ascii_lowercase().contains("bike") {
            VehicleClass::Bike
        } else {
            VehicleClass::Car
        }
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub vehicle: Vehicle,
    pub location: LocationId,
    pub zone: ZoneId,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    /// Last known location; set to the pickup point when the rider books.
    pub location: LocationId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripState {
    Requested,
    Assigned,
    Ongoing,
    Completed,
    Cancelled,
}

impl TripState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TripState::Completed | TripState::Cancelled)
    }

    /// A trip still waiting for or using a driver.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TripState::Requested | TripState::Assigned | TripState::Ongoing
        )
    }

    /// Forward edges of the lifecycle:
    /// REQUESTED → ASSIGNED → ONGOING → COMPLETED, REQUESTED | ASSIGNED → CANCELLED.
    /// ASSIGNED → COMPLETED is allowed for trips that are closed without an explicit start.
    pub fn can_transition_to(self, next: TripState) -> bool {
        use TripState::*;
        matches!(
            (self, next),
            (Requested, Assigned)
                | (Assigned, Ongoing)
                | (Assigned, Completed)
                | (Ongoing, Completed)
                | (Requested, Cancelled)
                | (Assigned, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TripState::Requested => "REQUESTED",
            TripState::Assigned => "ASSIGNED",
            TripState::Ongoing => "ONGOING",
            TripState::Completed => "COMPLETED",
            TripState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TripState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct Trip {
    pub id: TripId,
    pub rider: RiderId,
    /// Set while ASSIGNED, ONGOING or COMPLETED. A CANCELLED trip keeps the
    /// driver it had so the cancellation can be undone.
    pub driver: Option<DriverId>,
    pub pickup: LocationId,
    pub dropoff: LocationId,
    pub state: TripState,
    /// Zero until the trip completes.
    pub fare: f64,
}

impl Trip {
    pub fn new(id: TripId, rider: RiderId, pickup: LocationId, dropoff: LocationId) -> Self {
        Self {
            id,
            rider,
            driver: None,
            pickup,
            dropoff,
            state: TripState::Requested,
            fare: 0.0,
        }
    }
}
