use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, QueueConfig, ServerConfig, StreamConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub queue: QueueConfig,
    pub stream: StreamConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. `RELAY_CONFIG_DIR` if set, else `./.relay/` (created when missing)
    /// 2. `config.toml` in that directory if it exists, else defaults
    /// 3. `.env` file, then `RELAY_*` environment overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        let _ = dotenvy::dotenv();
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: RELAY_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to catch errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.queue.validate()?;
        self.stream.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log file location inside the config directory, if file logging is on
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };

        Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file)))
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} sessions)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!(
            "  queue: capacity={}, poll={}ms idle/{}ms empty",
            self.queue.capacity, self.queue.idle_poll_ms, self.queue.empty_poll_ms
        );
        info!(
            "  backlog drain: {} (every {}s)",
            if self.queue.drain_when_disconnected {
                "enabled"
            } else {
                "disabled"
            },
            self.queue.drain_interval_secs
        );
        info!(
            "  stream: report={}s, idle notice={}s",
            self.stream.report_interval_secs, self.stream.idle_notice_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RELAY_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RELAY_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "RELAY_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Queue
        Self::apply_env_parse("RELAY_QUEUE_CAPACITY", &mut self.queue.capacity);
        Self::apply_env_parse("RELAY_QUEUE_IDLE_POLL_MS", &mut self.queue.idle_poll_ms);
        Self::apply_env_parse("RELAY_QUEUE_EMPTY_POLL_MS", &mut self.queue.empty_poll_ms);
        Self::apply_env_bool(
            "RELAY_QUEUE_DRAIN_WHEN_DISCONNECTED",
            &mut self.queue.drain_when_disconnected,
        );
        Self::apply_env_parse(
            "RELAY_QUEUE_DRAIN_INTERVAL_SECS",
            &mut self.queue.drain_interval_secs,
        );

        // Stream
        Self::apply_env_parse(
            "RELAY_STREAM_REPORT_INTERVAL_SECS",
            &mut self.stream.report_interval_secs,
        );
        Self::apply_env_parse(
            "RELAY_STREAM_IDLE_NOTICE_SECS",
            &mut self.stream.idle_notice_secs,
        );

        // Logging
        Self::apply_env_parse("RELAY_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RELAY_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RELAY_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values leave the target untouched
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
