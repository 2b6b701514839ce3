//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable pointing at the configuration file.
pub const CONFIG_PATH_ENV: &str = "SQUADCLAIM_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the variable.
        var: String,
        /// Why the value was rejected.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for squadclaim_common::ClaimError {
    fn from(err: ConfigError) -> Self {
        squadclaim_common::ClaimError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Read configuration from {}", path.as_ref().display());
        Self::load_from_str(&content, |key| env::var(key).ok())
    }

    /// Parse YAML content, apply overrides from `lookup`, and validate.
    pub fn load_from_str<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the usual places
    ///
    /// `SQUADCLAIM_CONFIG_PATH`, then `config.yaml` / `config.yml` in the
    /// working directory, then built-in defaults.
    pub fn load() -> Result<Config, ConfigError> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            info!("No configuration file found, using defaults");
            Self::load_from_str("", |key| env::var(key).ok())?
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config(path)
    }

    /// Apply environment variable overrides to configuration
    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup("CLAIM_COMMAND_PREFIX") {
            config.claim.command_prefix = prefix;
        }

        if let Some(value) = lookup("CLAIM_ADMIN_COOLDOWN") {
            config.claim.admin_cooldown_seconds = parse_env("CLAIM_ADMIN_COOLDOWN", &value)?;
        }

        if let Some(value) = lookup("CLAIM_PLAYER_COOLDOWN") {
            config.claim.player_cooldown_seconds = parse_env("CLAIM_PLAYER_COOLDOWN", &value)?;
        }

        if let Some(value) = lookup("CLAIM_CHUNK_SIZE") {
            config.claim.chunk_size = parse_env("CLAIM_CHUNK_SIZE", &value)?;
        }

        if let Some(value) = lookup("CLAIM_ONLY_SQUAD_LEADER") {
            config.claim.only_squad_leader = parse_env("CLAIM_ONLY_SQUAD_LEADER", &value)?;
        }

        if let Some(value) = lookup("CLAIM_DEBUG") {
            config.claim.debug = parse_env("CLAIM_DEBUG", &value)?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_empty_content_yields_defaults() {
        let config = ConfigLoader::load_from_str("", no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::load_from_str("claim:\n  chunk_size: 3\n", no_env).unwrap();
        assert_eq!(config.claim.chunk_size, 3);
        assert_eq!(config.claim.command_prefix, "claim");
        assert_eq!(config.claim.player_cooldown_seconds, 5.0);
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            ("CLAIM_COMMAND_PREFIX", "squads"),
            ("CLAIM_PLAYER_COOLDOWN", "15"),
            ("CLAIM_ONLY_SQUAD_LEADER", "true"),
            ("LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::load_from_str("claim:\n  command_prefix: other\n", |key| {
            env.get(key).map(|v| (*v).to_string())
        })
        .unwrap();

        assert_eq!(config.claim.command_prefix, "squads");
        assert_eq!(config.claim.player_cooldown_seconds, 15.0);
        assert!(config.claim.only_squad_leader);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let err = ConfigLoader::load_from_str("", |key| {
            (key == "CLAIM_CHUNK_SIZE").then(|| "many".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::EnvParseError { ref var, .. } if var == "CLAIM_CHUNK_SIZE"));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = ConfigLoader::load_from_str("claim: [unclosed", no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_runs_after_overrides() {
        let err = ConfigLoader::load_from_str("", |key| (key == "CLAIM_CHUNK_SIZE").then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
