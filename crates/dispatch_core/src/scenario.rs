//! City seeds: a declarative description of a road network and its fleet.
//!
//! Seeds are plain data (serde) so they can be kept as JSON next to a binary.
//! [`build_session`] replays a seed through the public setup operations of
//! [`DispatchSession`], so a seed can never bypass validation.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DispatchConfig;
use crate::ecs::ZoneId;
use crate::error::DispatchError;
use crate::session::DispatchSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSeed {
    pub zone: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSeed {
    pub name: String,
    pub zone: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSeed {
    pub from: String,
    pub to: String,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSeed {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub plate: Option<String>,
    pub location: String,
    pub zone: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySeed {
    #[serde(default)]
    pub zones: Vec<ZoneSeed>,
    #[serde(default)]
    pub locations: Vec<LocationSeed>,
    #[serde(default)]
    pub roads: Vec<RoadSeed>,
    #[serde(default)]
    pub drivers: Vec<DriverSeed>,
}

impl CitySeed {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_zone(mut self, zone: u32, name: &str) -> Self {
        self.zones.push(ZoneSeed {
            zone,
            name: name.to_string(),
        });
        self
    }

    pub fn with_location(mut self, name: &str, zone: u32) -> Self {
        self.locations.push(LocationSeed {
            name: name.to_string(),
            zone,
        });
        self
    }

    pub fn with_road(mut self, from: &str, to: &str, distance: u32) -> Self {
        self.roads.push(RoadSeed {
            from: from.to_string(),
            to: to.to_string(),
            distance,
        });
        self
    }

    pub fn with_driver(mut self, name: &str, model: Option<&str>, location: &str, zone: u32) -> Self {
        self.drivers.push(DriverSeed {
            name: name.to_string(),
            model: model.map(str::to_string),
            plate: None,
            location: location.to_string(),
            zone,
        });
        self
    }

    /// Eight locations in three zones (center, tech, periphery) with five drivers.
    pub fn demo() -> Self {
        Self::default()
            .with_zone(1, "Center")
            .with_zone(2, "Tech")
            .with_zone(3, "Periphery")
            .with_location("CityCenter", 1)
            .with_location("Mall", 1)
            .with_location("RailwayStation", 1)
            .with_location("TechPark", 2)
            .with_location("University", 2)
            .with_location("Airport", 3)
            .with_location("Hospital", 3)
            .with_location("Suburb", 3)
            .with_road("CityCenter", "Mall", 8)
            .with_road("CityCenter", "RailwayStation", 6)
            .with_road("Mall", "RailwayStation", 10)
            .with_road("TechPark", "University", 12)
            .with_road("Airport", "Hospital", 18)
            .with_road("Hospital", "Suburb", 15)
            .with_road("Airport", "Suburb", 22)
            .with_road("CityCenter", "TechPark", 20)
            .with_road("CityCenter", "Airport", 25)
            .with_road("RailwayStation", "Airport", 28)
            .with_road("Mall", "University", 5)
            .with_road("TechPark", "Airport", 30)
            .with_road("University", "Suburb", 35)
            .with_road("RailwayStation", "Hospital", 32)
            .with_driver("Driver Ali", None, "Airport", 3)
            .with_driver("Driver Bob", None, "Mall", 1)
            .with_driver("Driver Charlie", Some("Yamaha Bike"), "TechPark", 2)
            .with_driver("Driver Diana", None, "CityCenter", 1)
            .with_driver("Driver Eva", None, "Hospital", 3)
    }
}

/// Build a session from a seed. Stops at the first invalid entry.
pub fn build_session(seed: &CitySeed, config: DispatchConfig) -> Result<DispatchSession, DispatchError> {
    let mut session = DispatchSession::new(config);
    for zone in &seed.zones {
        session.name_zone(ZoneId(zone.zone), &zone.name);
    }
    for location in &seed.locations {
        session.add_location(&location.name, ZoneId(location.zone))?;
    }
    for road in &seed.roads {
        session.add_road(&road.from, &road.to, road.distance)?;
    }
    for driver in &seed.drivers {
        session.add_driver(
            &driver.name,
            driver.model.as_deref(),
            driver.plate.as_deref(),
            &driver.location,
            ZoneId(driver.zone),
        )?;
    }
    info!(
        zones = seed.zones.len(),
        locations = seed.locations.len(),
        roads = seed.roads.len(),
        drivers = seed.drivers.len(),
        "session built from seed"
    );
    Ok(session)
}
