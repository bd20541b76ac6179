//! Configuration management

use crate::error::{CaltrackError, Result};
use crate::infrastructure::settings::DEFAULT_CALORIE_LIMIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_limit() -> i64 {
    DEFAULT_CALORIE_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Limit used until one is set and stored
    #[serde(default = "default_limit")]
    pub default_limit: i64,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with the given fallback limit
    pub fn new(default_limit: i64) -> Self {
        Config {
            default_limit,
            created: Utc::now(),
        }
    }

    /// Load config from .caltrack/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".caltrack").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CaltrackError::NotTrackerDirectory(path.to_path_buf())
            } else {
                CaltrackError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| CaltrackError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .caltrack/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let caltrack_dir = path.join(".caltrack");
        let config_path = caltrack_dir.join("config.toml");

        if !caltrack_dir.exists() {
            fs::create_dir(&caltrack_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CaltrackError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_CALORIE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_limit, 2500);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(1800);

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".caltrack").exists());
        assert!(temp.path().join(".caltrack/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.default_limit, 1800);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_missing_default_limit_uses_builtin() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".caltrack")).unwrap();
        fs::write(
            temp.path().join(".caltrack/config.toml"),
            "created = \"2025-01-17T08:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.default_limit, 2500);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            CaltrackError::NotTrackerDirectory(_) => {}
            other => panic!("Expected NotTrackerDirectory error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_broken_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".caltrack")).unwrap();
        fs::write(temp.path().join(".caltrack/config.toml"), "default_limit = [").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            CaltrackError::Config(msg) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
