//! Error taxonomy for the dispatch core.
//!
//! Every variant belongs to one of three kinds (see [`ErrorKind`]) so the
//! presentation layer can decide whether to re-prompt, surface or abort.

use thiserror::Error;

use crate::ecs::{DriverId, RiderId, TripId, TripState};

/// Coarse classification of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unknown location name or trip/driver/rider reference.
    NotFound,
    /// Both locations exist but no road path connects them.
    Unreachable,
    /// The request is well formed but not allowed in the current state.
    InvalidOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("unknown driver: {0}")]
    UnknownDriver(DriverId),

    #[error("unknown rider: {0}")]
    UnknownRider(RiderId),

    #[error("unknown trip: {0}")]
    UnknownTrip(TripId),

    #[error("no route from {from} to {to}")]
    Unreachable { from: String, to: String },

    #[error("location already exists: {0}")]
    DuplicateLocation(String),

    #[error("rider name must not be empty")]
    EmptyRiderName,

    #[error("driver {0} is not available")]
    DriverUnavailable(DriverId),

    #[error("trip {trip} cannot move from {from} to {to}")]
    InvalidTransition {
        trip: TripId,
        from: TripState,
        to: TripState,
    },

    #[error("nothing to undo")]
    NothingToUndo,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::UnknownLocation(_)
            | DispatchError::UnknownDriver(_)
            | DispatchError::UnknownRider(_)
            | DispatchError::UnknownTrip(_) => ErrorKind::NotFound,
            DispatchError::Unreachable { .. } => ErrorKind::Unreachable,
            DispatchError::DuplicateLocation(_)
            | DispatchError::EmptyRiderName
            | DispatchError::DriverUnavailable(_)
            | DispatchError::InvalidTransition { .. }
            | DispatchError::NothingToUndo => ErrorKind::InvalidOperation,
        }
    }
}
