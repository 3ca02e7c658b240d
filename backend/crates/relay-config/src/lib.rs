mod config;
mod error;
mod log_level;
mod logging_config;
mod queue_config;
mod server_config;
mod stream_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use queue_config::QueueConfig;
pub use server_config::ServerConfig;
pub use stream_config::StreamConfig;

const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".relay";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 50051;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 100;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 10000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
