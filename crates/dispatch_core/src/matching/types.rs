use crate::ecs::{DriverId, LocationId, ZoneId};

/// What a dispatch policy needs to know about one driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCandidate {
    pub driver: DriverId,
    pub location: LocationId,
    pub zone: ZoneId,
    pub available: bool,
}

/// The driver chosen for a pickup and the cost it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchMatch {
    pub driver: DriverId,
    pub cost: u64,
}
