//! Configuration file loading

use crate::{models::Config, Result};
use std::path::PathBuf;

pub struct ConfigStorage {
    config_path: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load a JSON config file. Sections and fields left out keep their defaults.
    pub fn load(&self) -> Result<Config> {
        let content = std::fs::read_to_string(&self.config_path)?;

        // Handle empty file case
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
