//! Wire messages for the relay.
//!
//! `DataResponse` frames carry one queued element each on a streaming
//! session. The command pair travels as JSON over HTTP.

use serde::{Deserialize, Serialize};

/// One element forwarded to a streaming consumer
#[derive(Clone, PartialEq, prost::Message)]
pub struct DataResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
pub struct SendCommandRequest {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, prost::Message)]
pub struct SendCommandResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

impl DataResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
