pub mod algorithm;
pub mod nearest;
pub mod simple;
pub mod types;

use bevy_ecs::prelude::Resource;

use crate::config::{DispatchConfig, DispatchPolicyKind};

pub use algorithm::DispatchPolicy;
pub use nearest::NearestDriverPolicy;
pub use simple::FirstAvailablePolicy;
pub use types::{DispatchMatch, DriverCandidate};

/// Resource wrapper for the dispatch policy trait object.
#[derive(Resource)]
pub struct DispatchPolicyResource(pub Box<dyn DispatchPolicy>);

impl DispatchPolicyResource {
    pub fn new(policy: Box<dyn DispatchPolicy>) -> Self {
        Self(policy)
    }
}

impl std::ops::Deref for DispatchPolicyResource {
    type Target = dyn DispatchPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Construct the policy selected in `config`.
pub fn build_policy(config: &DispatchConfig) -> Box<dyn DispatchPolicy> {
    match config.policy {
        DispatchPolicyKind::NearestDriver => Box::new(NearestDriverPolicy::new(
            config.zone_penalty,
            config.unreachable_cost,
        )),
        DispatchPolicyKind::FirstAvailable => Box::new(FirstAvailablePolicy),
    }
}
