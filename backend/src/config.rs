//! Server configuration.
//!
//! Settings come from an optional TOML file, then environment overrides:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 9000
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! # Environment Variables
//!
//! - `CLINIC_CONFIG`: Path to a config file (must exist when set)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: the configured level, `info`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::db::repository::RepositoryError;

/// Config file locations searched when `CLINIC_CONFIG` is unset.
const DEFAULT_LOCATIONS: [&str; 2] = ["clinic.toml", "backend/clinic.toml"];

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `clinic_reservations=debug`
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` if successful
    /// * `Err(RepositoryError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find the first existing config file among the default locations.
    pub fn find_default_file() -> Option<PathBuf> {
        DEFAULT_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load configuration the way the server binary does: `CLINIC_CONFIG` or
    /// the first default location (falling back to built-in defaults), then
    /// environment overrides.
    pub fn load() -> Result<Self, RepositoryError> {
        let base = match std::env::var("CLINIC_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::find_default_file() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        base.with_env_overrides()
    }

    /// Apply `HOST`, `PORT` and `RUST_LOG` on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, RepositoryError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|e| {
                RepositoryError::configuration(format!("Invalid PORT '{}': {}", port, e))
            })?;
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        Ok(self)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, RepositoryError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                RepositoryError::configuration(format!(
                    "Invalid bind address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }
}
