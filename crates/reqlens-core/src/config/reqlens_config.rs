//! Top-level reqlens configuration with layered resolution.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ServerConfig, StorageConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "reqlens.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`REQLENS_*`)
/// 3. Project config (`reqlens.toml` in the root directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReqlensConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub db_path: Option<String>,
    pub read_pool_size: Option<usize>,
    pub log_filter: Option<String>,
}

impl ReqlensConfig {
    /// Load configuration, layering the project file, environment and CLI
    /// flags over the compiled defaults, then validate the result.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ReqlensConfig) -> Result<(), ConfigError> {
        let addr = config.server.effective_bind_address();
        if addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationFailed {
                field: "server.bind_address".to_string(),
                message: format!("'{addr}' is not a socket address"),
            });
        }
        if let Some(ref path) = config.storage.db_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.storage.read_pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Parsed bind address. Only valid after `validate` succeeded.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.server.effective_bind_address();
        addr.parse().map_err(|_| ConfigError::ValidationFailed {
            field: "server.bind_address".to_string(),
            message: format!("'{addr}' is not a socket address"),
        })
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ReqlensConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ReqlensConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut ReqlensConfig, other: &ReqlensConfig) {
        if other.server.bind_address.is_some() {
            base.server.bind_address = other.server.bind_address.clone();
        }
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
    }

    /// Apply `REQLENS_*` environment overrides. Unparsable numbers are skipped.
    fn apply_env_overrides(config: &mut ReqlensConfig) {
        if let Ok(val) = std::env::var("REQLENS_BIND_ADDRESS") {
            config.server.bind_address = Some(val);
        }
        if let Ok(val) = std::env::var("REQLENS_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("REQLENS_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REQLENS_LOG_FILTER") {
            config.logging.filter = Some(val);
        }
    }

    fn apply_cli_overrides(config: &mut ReqlensConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.bind_address {
            config.server.bind_address = Some(v.clone());
        }
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.read_pool_size {
            config.storage.read_pool_size = Some(v);
        }
        if let Some(ref v) = cli.log_filter {
            config.logging.filter = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
