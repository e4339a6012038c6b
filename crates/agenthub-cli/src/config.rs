//! Monitor configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `AGENTHUB__SECTION__KEY` environment variables. Command-line
//! flags are applied on top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use agenthub_session::SessionConfig;
use agenthub_types::Locale;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "AGENTHUB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("backend.base_url must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Simulation backend root, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; unset means requests may wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            log_capacity: default_log_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error); `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Diagnostics file. Without one, the dashboard discards diagnostics.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_log_capacity() -> usize {
    100
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl MonitorConfig {
    /// Load from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        } else {
            builder = builder.add_source(File::with_name("agenthub").required(false));
        }
        Self::build(builder, environment())
    }

    /// Load from TOML text, with `env` standing in for the environment
    #[cfg(test)]
    pub fn from_toml(toml: &str, env: Environment) -> Result<Self, ConfigError> {
        let builder =
            config::Config::builder().add_source(File::from_str(toml, config::FileFormat::Toml));
        Self::build(builder, env)
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.backend.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        if self.backend.request_timeout_secs == Some(0) {
            return Err(ConfigError::Zero("backend.request_timeout_secs"));
        }
        if self.session.poll_interval_secs == 0 {
            return Err(ConfigError::Zero("session.poll_interval_secs"));
        }
        if self.session.log_capacity == 0 {
            return Err(ConfigError::Zero("session.log_capacity"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            poll_interval: Duration::from_secs(self.session.poll_interval_secs),
            log_capacity: self.session.log_capacity,
            locale: self.display.locale,
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
