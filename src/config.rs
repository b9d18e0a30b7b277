//! Engine configuration.
//!
//! Values resolve with priority: config.toml > .env / environment > defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::events::{SeasonalCalendar, SeasonalEvent};
use crate::logging::LogOnError;
use crate::progression::DEFAULT_LEVEL_CAP;

/// Default config file, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Used when neither config.toml nor DATABASE_PATH names a database
pub const DEFAULT_DATABASE_PATH: &str = "data/flashcards.db";

// ==================== File format ====================

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<DatabaseSection>,
    progression: Option<ProgressionSection>,
    #[serde(default)]
    events: Vec<SeasonalEvent>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProgressionSection {
    level_cap: Option<u32>,
}

// ==================== Resolved configuration ====================

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionConfig {
    pub level_cap: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            level_cap: DEFAULT_LEVEL_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub database_path: PathBuf,
    pub progression: ProgressionConfig,
    pub events: Vec<SeasonalEvent>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            progression: ProgressionConfig::default(),
            events: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load from `config.toml` in the working directory, falling back to the
    /// environment and defaults. A malformed file is logged and ignored.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = std::fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|contents| toml::from_str::<FileConfig>(&contents).log_warn("Ignoring config.toml"));

        Self::resolve(file, std::env::var("DATABASE_PATH").ok())
    }

    /// Load from an explicit file. Unlike `load`, a missing or malformed
    /// file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(contents).map_err(|e| EngineError::Config(e.to_string()))?;
        Ok(Self::resolve(Some(file), None))
    }

    fn resolve(file: Option<FileConfig>, env_database_path: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let database_path = match (file.database.and_then(|db| db.path), env_database_path) {
            (Some(path), _) => {
                tracing::info!("Using database from config.toml: {}", path);
                PathBuf::from(path)
            }
            (None, Some(path)) => {
                tracing::info!("Using database from DATABASE_PATH env: {}", path);
                PathBuf::from(path)
            }
            (None, None) => {
                tracing::info!("Using default database path: {}", defaults.database_path.display());
                defaults.database_path
            }
        };

        let level_cap = file
            .progression
            .and_then(|p| p.level_cap)
            .unwrap_or(defaults.progression.level_cap);

        Self {
            database_path,
            progression: ProgressionConfig { level_cap },
            events: file.events,
        }
    }

    /// Seasonal multiplier calendar for the configured events
    pub fn calendar(&self) -> Result<SeasonalCalendar> {
        SeasonalCalendar::new(self.events.clone())
    }
}
