//! Error types for caltrack

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for caltrack
#[derive(Debug, Error)]
pub enum CaltrackError {
    #[error("Not a caltrack directory: {0}")]
    NotTrackerDirectory(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CaltrackError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CaltrackError::NotTrackerDirectory(_) => 2,
            CaltrackError::InvalidInput(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            CaltrackError::NotTrackerDirectory(path) => {
                format!(
                    "Not a caltrack directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'caltrack init' in this directory to create a tracker\n\
                    • Navigate to an existing caltrack directory\n\
                    • Set CALTRACK_ROOT environment variable to your tracker path",
                    path.display()
                )
            }
            CaltrackError::InvalidInput(msg) => {
                format!(
                    "{}\n\n\
                    Calories must be whole numbers.\n\
                    Examples:\n\
                    caltrack limit 2000\n\
                    meal Breakfast 400",
                    msg
                )
            }
            CaltrackError::Config(msg) => {
                if msg.contains("default_limit") {
                    format!(
                        "{}\n\n\
                        Example: caltrack config default_limit 2000",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using CaltrackError
pub type Result<T> = std::result::Result<T, CaltrackError>;
