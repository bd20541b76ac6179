//! Config management use case

use crate::error::{CaltrackError, Result};
use crate::infrastructure::{Config, FileSystemRepository, TrackerRepository};

/// Service for managing tracker configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "default_limit" => Ok(config.default_limit.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(CaltrackError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: default_limit, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "default_limit" => {
                config.default_limit = value.trim().parse().map_err(|_| {
                    CaltrackError::Config(format!(
                        "Invalid default_limit: '{}'. Expected a whole number",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(CaltrackError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(CaltrackError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: default_limit",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        tracing::debug!(key, value, "config updated");
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
