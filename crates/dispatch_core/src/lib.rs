pub mod config;
pub mod ecs;
pub mod error;
pub mod fleet;
pub mod graph;
pub mod ledger;
pub mod matching;
pub mod pricing;
pub mod riders;
pub mod rollback;
pub mod scenario;
pub mod session;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{DispatchError, ErrorKind};
pub use session::DispatchSession;
