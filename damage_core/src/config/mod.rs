//! Configuration loading from TOML files

mod constants;
mod options;

pub use constants::DamageConstants;
pub use options::GameOptions;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Map conditions that change how damage lands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    /// Vacuum or trace atmosphere
    #[serde(default)]
    pub vacuum: bool,
}

/// Everything the engine reads besides the units themselves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub options: GameOptions,
    #[serde(default)]
    pub constants: DamageConstants,
    #[serde(default)]
    pub environment: Environment,
}

impl RulesConfig {
    /// Load and validate rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let rules: RulesConfig = load_toml(path)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Parse and validate rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = parse_toml(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
