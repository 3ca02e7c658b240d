pub mod error;
pub mod health;
pub mod logger;
pub mod producer;
pub mod routes;
pub mod server_state;

#[cfg(test)]
mod tests;

pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::producer::StdinProducer;
pub use crate::routes::build_router;
pub use crate::server_state::ServerState;
