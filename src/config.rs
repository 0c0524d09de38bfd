// Engine configuration, stored as RON

use crate::command::{Calculator, CommandHistory, Operand};
use ron::from_str as ron_from_str;
use ron::ser::{PrettyConfig, to_string_pretty as ron_to_string_pretty};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_DIR_NAME: &str = "reversible_calc";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings used to build a history engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Starting value of the calculator
    pub initial_value: Operand,

    /// Maximum number of history entries, `None` for unbounded
    pub max_history: Option<usize>,

    /// Default `tracing` filter used by the command line front-end
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_value: 0,
            max_history: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(ron_data: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron_from_str(ron_data).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to deserialize from RON: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron_to_string_pretty(self, PrettyConfig::default()).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize to RON: {}", e))
        })
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Write the configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load the user configuration, falling back to defaults when absent
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == Some(0) {
            return Err(ConfigError::Invalid(
                "max_history must be at least 1 (omit it for unbounded history)".into(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        Ok(())
    }

    /// Build a calculator history from this configuration
    pub fn build_history(&self) -> CommandHistory<Calculator> {
        let calculator = Calculator::with_value(self.initial_value);
        match self.max_history.and_then(NonZeroUsize::new) {
            Some(limit) => CommandHistory::with_max_history(calculator, limit),
            None => CommandHistory::new(calculator),
        }
    }
}

/// Default location of the configuration file
///
/// `<config dir>/reversible_calc/config.ron`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
