//! Configuration management
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `BOOKIE_*` environment variables. The result is validated before use.

use crate::bets::settlement::PushPolicy;
use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookieConfig {
    pub ledger: LedgerConfig,
    pub api: ApiConfig,
    pub monitoring: MonitoringConfig,
}

/// Rules applied by the bet ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Whether a creator may accept their own bet
    pub allow_self_accept: bool,
    pub push_policy: PushPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            allow_self_accept: true,
            push_policy: PushPolicy::Void,
        }
    }
}

/// HTTP adapter settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_filter: "bookie=info,tower_http=info".to_string(),
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> Result<BookieConfig, ConfigurationError> {
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Same as `load`, with environment lookups supplied by the caller
    pub fn load_with_env(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<BookieConfig, ConfigurationError> {
        let mut config = match &self.config_path {
            Some(path) => Self::load_from_file(path)?,
            None => BookieConfig::default(),
        };

        apply_env_overrides(&mut config, lookup)?;
        validate(&config)?;

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<BookieConfig, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }
}

fn apply_env_overrides(
    config: &mut BookieConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigurationError> {
    if let Some(host) = lookup("BOOKIE_API_HOST") {
        config.api.host = host;
    }
    if let Some(port) = lookup("BOOKIE_API_PORT") {
        config.api.port = port.parse().map_err(|_| ConfigurationError::InvalidValue {
            field: "BOOKIE_API_PORT".to_string(),
            value: port.clone(),
            reason: "Invalid port number".to_string(),
        })?;
    }
    if let Some(allow) = lookup("BOOKIE_ALLOW_SELF_ACCEPT") {
        config.ledger.allow_self_accept =
            allow.parse().map_err(|_| ConfigurationError::InvalidValue {
                field: "BOOKIE_ALLOW_SELF_ACCEPT".to_string(),
                value: allow.clone(),
                reason: "Expected true or false".to_string(),
            })?;
    }
    if let Some(policy) = lookup("BOOKIE_PUSH_POLICY") {
        config.ledger.push_policy =
            policy
                .parse()
                .map_err(|reason| ConfigurationError::InvalidValue {
                    field: "BOOKIE_PUSH_POLICY".to_string(),
                    value: policy.clone(),
                    reason,
                })?;
    }
    if let Some(filter) = lookup("BOOKIE_LOG_FILTER") {
        config.monitoring.log_filter = filter;
    }

    Ok(())
}

fn validate(config: &BookieConfig) -> Result<(), ConfigurationError> {
    if config.api.host.trim().is_empty() {
        return Err(ConfigurationError::ValidationFailed(
            "api.host must not be empty".to_string(),
        ));
    }
    if config.api.port == 0 {
        return Err(ConfigurationError::ValidationFailed(
            "api.port must be non-zero".to_string(),
        ));
    }
    if config.api.request_timeout_secs == 0 {
        return Err(ConfigurationError::ValidationFailed(
            "api.request_timeout_secs must be positive".to_string(),
        ));
    }

    Ok(())
}
