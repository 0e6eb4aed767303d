//! Session-wide policy knobs.
//!
//! The zone penalty and the bounded cost of an unreachable driver are policy
//! values carried over unchanged from the dispatch rules; they are exposed here
//! so they can be tuned without touching the matching code.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::pricing::PricingConfig;

/// Added to a driver's cost when their zone differs from the pickup zone.
pub const ZONE_PENALTY: u64 = 50;

/// Cost assigned to a driver with no path to the pickup. Finite so that such a
/// driver can still be chosen when nobody else is available.
pub const UNREACHABLE_COST: u64 = (i32::MAX / 2) as u64;

/// Which dispatch policy the session installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchPolicyKind {
    /// Lowest distance-plus-zone-penalty cost.
    #[default]
    NearestDriver,
    /// First available driver in fleet order; baseline for comparisons.
    FirstAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct DispatchConfig {
    pub zone_penalty: u64,
    pub unreachable_cost: u64,
    pub policy: DispatchPolicyKind,
    pub pricing: PricingConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            zone_penalty: ZONE_PENALTY,
            unreachable_cost: UNREACHABLE_COST,
            policy: DispatchPolicyKind::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn with_zone_penalty(mut self, penalty: u64) -> Self {
        self.zone_penalty = penalty;
        self
    }

    pub fn with_unreachable_cost(mut self, cost: u64) -> Self {
        self.unreachable_cost = cost;
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
