use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ROWS: usize = 12;
pub const DEFAULT_COLUMNS: usize = 8;
pub const DEFAULT_UPCOMING_COUNT: usize = 3;

// Timing (in milliseconds)
pub const DEFAULT_TOTAL_TIME_MS: u64 = 120_000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_FALL_INTERVAL_MS: u64 = 600;

pub const DEFAULT_PHRASE: &str = "先发制人";

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "JASMINE_CONFIG";

// ============================================================================
// Engine Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    /// Length of a round
    pub total_time_ms: u64,
    /// How often the countdown reports
    pub tick_interval_ms: u64,
    /// Tiles visible ahead of the falling one
    pub upcoming_count: usize,
    /// Frontend gravity cadence
    pub fall_interval_ms: u64,
    pub phrases: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            total_time_ms: DEFAULT_TOTAL_TIME_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            upcoming_count: DEFAULT_UPCOMING_COUNT,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            phrases: vec![DEFAULT_PHRASE.to_string()],
        }
    }
}

impl EngineConfig {
    pub fn total_time(&self) -> Duration {
        Duration::from_millis(self.total_time_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(self.fall_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::Invalid(format!(
                "board must have at least one cell, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.upcoming_count == 0 {
            return Err(ConfigError::Invalid("upcoming_count must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.phrases.is_empty() {
            return Err(ConfigError::Invalid("phrase dictionary is empty".into()));
        }
        if self.phrases.iter().any(|phrase| phrase.is_empty()) {
            return Err(ConfigError::Invalid("phrases must not be empty".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by `JASMINE_CONFIG`, or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }
}
