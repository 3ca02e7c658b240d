use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] relay_config::ConfigError),

    #[error("Queue error: {0}")]
    Queue(#[from] relay_core::CoreError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Metrics error: {message} {location}")]
    Metrics {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ServerError {
    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn metrics<S: Into<String>>(message: S) -> Self {
        Self::Metrics {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
