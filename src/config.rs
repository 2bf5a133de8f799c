use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// API credentials and the account phone number, read from `config.json`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "ApiId")]
    pub api_id: i32,
    #[serde(rename = "ApiHash")]
    pub api_hash: String,
    /// Phone number including the country code, e.g. `+10000000000`.
    #[serde(rename = "Number")]
    pub number: String,
}

impl Config {
    pub fn load_from_path(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path.display().to_string()));
        }
        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_id <= 0 {
            return Err(ConfigError::Invalid("ApiId must be a positive integer".to_string()));
        }
        if self.api_hash.trim().is_empty() {
            return Err(ConfigError::Invalid("ApiHash must not be empty".to_string()));
        }
        if self.number.trim().is_empty() {
            return Err(ConfigError::Invalid("Number must not be empty".to_string()));
        }
        Ok(())
    }
}
