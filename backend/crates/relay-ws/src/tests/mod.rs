mod connection_registry;
mod error;
mod forward_report;
mod session_config;
