//! # Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HAULAGE_DB_PATH=/var/lib/haulage/haulage.db                        │
//! │     HAULAGE_TRUCK_CAPACITY_GRAMS=2000000                               │
//! │     HAULAGE_LOG_LEVEL=debug                                            │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the default location)               │
//! │     ~/.config/haulage/haulage.toml (Linux)                             │
//! │     ~/Library/Application Support/com.haulage.haulage/haulage.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/haulage/haulage.db"
//! max_connections = 5
//!
//! [loading]
//! truck_capacity_grams = 2000000.0
//!
//! [log]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use haulage_core::validation::validate_capacity;
use haulage_core::{Grams, TruckLoader, ValidationError, TRUCK_CAPACITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "haulage", "haulage")
        .map(|dirs| dirs.data_dir().join("haulage.db"))
        .unwrap_or_else(|| PathBuf::from("haulage.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[loading]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingSettings {
    /// Maximum load of one truck, in grams.
    #[serde(default = "default_truck_capacity")]
    pub truck_capacity_grams: f64,
}

fn default_truck_capacity() -> f64 {
    TRUCK_CAPACITY.grams()
}

impl Default for LoadingSettings {
    fn default() -> Self {
        LoadingSettings {
            truck_capacity_grams: default_truck_capacity(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete configuration of the `haulage` binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub loading: LoadingSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, or `haulage.toml` in the platform config
    ///    directory. Only an explicit path is required to exist.
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file; missing keys take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        debug!(?path, "Loading config file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks values that would otherwise fail later, far from their source.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_capacity(self.truck_capacity())?;

        if self.database.max_connections == 0 {
            return Err(ValidationError::MustBePositive {
                field: "database.max_connections".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies `HAULAGE_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("HAULAGE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(capacity) = lookup("HAULAGE_TRUCK_CAPACITY_GRAMS") {
            match capacity.parse::<f64>() {
                Ok(grams) => {
                    debug!(grams, "Overriding truck capacity from environment");
                    self.loading.truck_capacity_grams = grams;
                }
                Err(_) => warn!(value = %capacity, "Ignoring invalid HAULAGE_TRUCK_CAPACITY_GRAMS"),
            }
        }

        if let Some(level) = lookup("HAULAGE_LOG_LEVEL") {
            self.log.level = level;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "haulage", "haulage")
            .map(|dirs| dirs.config_dir().join("haulage.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn truck_capacity(&self) -> Grams {
        Grams::from_grams(self.loading.truck_capacity_grams)
    }

    /// A loader for the configured truck capacity.
    pub fn loader(&self) -> TruckLoader {
        TruckLoader::new(self.truck_capacity())
    }
}
