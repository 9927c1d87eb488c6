//! Configuration management and validation.
//!
//! Settings are layered with figment, highest priority last:
//! 1. Built-in defaults
//! 2. User-level `~/.config/insectario-ingest/config.toml`
//! 3. Project-level `./insectario-ingest.toml`, or the file given with `--config`
//! 4. Environment variables (`INSECTARIO_*`, `__` separates sections, e.g.
//!    `INSECTARIO_STORAGE__DATABASE_PATH`)
//! 5. Command line flags, applied by the CLI through the `with_*` builders

use crate::app::models::SourceTable;
use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_DATABASE_FILE, DEFAULT_DUMP_FILE, DEFAULT_LOG_LEVEL, ENV_PREFIX,
    LOCAL_CONFIG_FILE,
};
use crate::{Error, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Valid values for `logging.level`
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Where records are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Use an in-memory SQLite database instead of the file
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            in_memory: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when neither `-v`/`-q` nor `RUST_LOG` is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Complete configuration of an ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Legacy SQL dump to read
    pub input_path: PathBuf,

    /// Tables to ingest; processed in their fixed order regardless of listing
    pub tables: Vec<SourceTable>,

    pub storage: StorageConfig,

    pub logging: LoggingConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_DUMP_FILE),
            tables: SourceTable::ALL.to_vec(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from defaults, TOML files and the environment
    ///
    /// An explicit config file must exist; the implicit ones are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        let config: Self = Self::figment(explicit).extract()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Build the provider chain
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let project_path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if project_path.exists() {
            figment = figment.merge(Toml::file(project_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    pub fn with_input_path(mut self, input_path: PathBuf) -> Self {
        self.input_path = input_path;
        self
    }

    pub fn with_database_path(mut self, database_path: PathBuf) -> Self {
        self.storage.database_path = database_path;
        self
    }

    pub fn with_in_memory(mut self) -> Self {
        self.storage.in_memory = true;
        self
    }

    pub fn with_tables(mut self, tables: Vec<SourceTable>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::configuration("Input path cannot be empty"));
        }

        if self.tables.is_empty() {
            return Err(Error::configuration(
                "At least one table must be enabled",
            ));
        }

        if !self.storage.in_memory && self.storage.database_path.as_os_str().is_empty() {
            return Err(Error::configuration(
                "Database path cannot be empty unless storage.in_memory is set",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
