//! Deterministic fare formula.
//!
//! `fare = (base_fare + distance * per_unit_rate) * multiplier`, where the
//! multiplier is `bike_multiplier` for bike-class vehicles and 1.0 otherwise.

use serde::{Deserialize, Serialize};

use crate::ecs::{LocationId, Vehicle, VehicleClass};
use crate::graph::{Distance, RoadGraph};

pub const BASE_FARE: f64 = 150.0;
pub const PER_UNIT_RATE: f64 = 30.0;
pub const BIKE_MULTIPLIER: f64 = 0.6;
/// Distance billed when pickup and dropoff are not connected.
pub const FALLBACK_DISTANCE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_fare: f64,
    pub per_unit_rate: f64,
    pub bike_multiplier: f64,
    pub fallback_distance: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            per_unit_rate: PER_UNIT_RATE,
            bike_multiplier: BIKE_MULTIPLIER,
            fallback_distance: FALLBACK_DISTANCE,
        }
    }
}

impl PricingConfig {
    pub fn calculate_fare(&self, distance: Distance, class: VehicleClass) -> f64 {
        let billed = distance.or_fallback(self.fallback_distance) as f64;
        let gross = self.base_fare + billed * self.per_unit_rate;
        match class {
            VehicleClass::Bike => gross * self.bike_multiplier,
            VehicleClass::Car => gross,
        }
    }

    /// Fare for a pickup/dropoff pair. Zero when no vehicle is attached.
    pub fn trip_fare(
        &self,
        graph: &RoadGraph,
        pickup: LocationId,
        dropoff: LocationId,
        vehicle: Option<&Vehicle>,
    ) -> f64 {
        let Some(vehicle) = vehicle else {
            return 0.0;
        };
        let distance = graph.shortest_distance_between(pickup, dropoff);
        self.calculate_fare(distance, vehicle.class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ZoneId;

    #[test]
    fn car_fare_over_ten_units() {
        let fare = PricingConfig::default().calculate_fare(Distance::Reachable(10), VehicleClass::Car);
        assert!((fare - 450.0).abs() < 1e-9, "fare was {fare}");
    }

    #[test]
    fn bike_fare_is_discounted() {
        let fare = PricingConfig::default().calculate_fare(Distance::Reachable(10), VehicleClass::Bike);
        assert!((fare - 270.0).abs() < 1e-9, "fare was {fare}");
    }

    #[test]
    fn unreachable_bills_fallback_distance() {
        let pricing = PricingConfig::default();
        let unreachable = pricing.calculate_fare(Distance::Unreachable, VehicleClass::Car);
        let ten = pricing.calculate_fare(Distance::Reachable(10), VehicleClass::Car);
        assert!((unreachable - ten).abs() < 1e-9);
    }

    #[test]
    fn no_vehicle_means_no_fare() {
        let mut graph = RoadGraph::new();
        let a = graph.add_location("A", ZoneId(1)).expect("A");
        let b = graph.add_location("B", ZoneId(1)).expect("B");
        graph.add_road("A", "B", 4).expect("road");
        let pricing = PricingConfig::default();

        assert_eq!(pricing.trip_fare(&graph, a, b, None), 0.0);
        let fare = pricing.trip_fare(&graph, a, b, Some(&Vehicle::default()));
        assert!((fare - 270.0).abs() < 1e-9, "fare was {fare}");
    }
}
