/// Service configuration loader - parses climate_service.toml
///
/// Keeps deployment details (listen address, worker count, dataset location)
/// out of the code. Every field has a default, so the file itself is
/// optional; environment variables and command-line flags are layered on top
/// by `main`.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "climate_service.toml";

/// Default location of the pre-built dataset.
pub const DEFAULT_SQLITE_PATH: &str = "Resources/hawaii.sqlite";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Size of the request worker pool.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: 4,
        }
    }
}

/// Dataset location
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub sqlite_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicitly named file, which must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &display)
    }

    /// Load `climate_service.toml` from the working directory, or defaults
    /// when it is absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            log::info!("No configuration file at {}, using defaults", DEFAULT_CONFIG_PATH);
            return Ok(Self::default());
        }
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Apply `CLIMATE_SQLITE_PATH` and `CLIMATE_PORT` overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("CLIMATE_SQLITE_PATH") {
            self.database.sqlite_path = path;
        }
        if let Ok(port) = env::var("CLIMATE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("CLIMATE_PORT '{}' is not a port number", port)))?;
        }
        self.validate()
    }

    /// Check values that deserialize fine but cannot be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid("server.workers must be at least 1".to_string()));
        }
        if self.database.sqlite_path.trim().is_empty() {
            return Err(ConfigError::Invalid("database.sqlite_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// `host:port` listen address.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
