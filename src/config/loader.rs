//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidPort(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidPort(value) => {
                write!(f, "{} is not a valid port for {}", value, PORT_ENV)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a configuration from a TOML file. No validation is applied;
/// callers go through [`resolve_config`].
fn load_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Resolve the effective configuration.
///
/// Precedence, lowest to highest: built-in defaults, TOML file, `PORT`
/// environment variable, `--port` CLI flag. Validation runs once on the
/// final result.
pub fn resolve_config(
    file: Option<&Path>,
    port_override: Option<u16>,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match file {
        Some(path) => load_file(path)?,
        None => ProxyConfig::default(),
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        config.listener.port = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
    }

    if let Some(port) = port_override {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
