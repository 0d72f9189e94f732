use crate::units::{Dimension, UnitCatalog, UnitPreferences};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Preferred {dimension} unit '{code}' is not a known {dimension} unit")]
    UnknownUnit { code: String, dimension: Dimension },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    // Used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_auto_optimize")]
    pub auto_optimize: bool,

    // Per-dimension display unit, e.g. volume = "ml"
    #[serde(default)]
    pub preferred: HashMap<Dimension, String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            auto_optimize: default_auto_optimize(),
            preferred: HashMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_auto_optimize() -> bool {
    true
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate(UnitCatalog::standard())?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Check that every preferred unit exists in its dimension
    pub fn validate(&self, catalog: &UnitCatalog) -> Result<(), ConfigError> {
        for (dimension, code) in &self.display.preferred {
            if catalog.get(code, *dimension).is_none() {
                return Err(ConfigError::UnknownUnit {
                    code: code.clone(),
                    dimension: *dimension,
                });
            }
        }
        Ok(())
    }

    pub fn unit_preferences(&self) -> UnitPreferences {
        UnitPreferences {
            dimensions: self.display.preferred.clone(),
            auto_optimize: self.display.auto_optimize,
        }
    }
}
