use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Queue capacity must be positive, got {capacity} {location}")]
    CapacityMisconfiguration {
        capacity: usize,
        location: ErrorLocation,
    },

    #[error("No Tokio runtime available to run the dispatcher {location}")]
    RuntimeUnavailable { location: ErrorLocation },

    #[error("Dispatch interval {name} must be non-zero {location}")]
    InvalidInterval {
        name: &'static str,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn capacity(capacity: usize) -> Self {
        Self::CapacityMisconfiguration {
            capacity,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn interval(name: &'static str) -> Self {
        Self::InvalidInterval {
            name,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
