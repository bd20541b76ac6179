//! Tracker directory discovery and access

use crate::error::{CaltrackError, Result};
use crate::infrastructure::store::FileStore;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker directory holding config and storage
pub const CALTRACK_DIR: &str = ".caltrack";
/// File inside the marker directory holding the key-value store
pub const STORE_FILE: &str = "storage.toml";

/// Abstract repository for tracker directories
pub trait TrackerRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .caltrack/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .caltrack/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .caltrack directory exists
    fn is_initialized(&self) -> bool;

    /// Create .caltrack directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of TrackerRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover tracker root. Checks CALTRACK_ROOT first, then walks up from
    /// the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("CALTRACK_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_caltrack_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(CaltrackError::Config(format!(
                    "CALTRACK_ROOT is set to '{}' but no .caltrack directory found. \
                    Run 'caltrack init' in that directory or unset CALTRACK_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover tracker root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_caltrack_dir(&current) {
                tracing::debug!(root = %current.display(), "found tracker directory");
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(CaltrackError::NotTrackerDirectory(start.to_path_buf())),
            }
        }
    }

    /// Path of the key-value store file
    pub fn store_path(&self) -> PathBuf {
        self.root.join(CALTRACK_DIR).join(STORE_FILE)
    }

    /// Open the key-value store of this tracker
    pub fn open_store(&self) -> Result<FileStore> {
        FileStore::open(&self.store_path())
    }

    fn has_caltrack_dir(path: &Path) -> bool {
        path.join(CALTRACK_DIR).is_dir()
    }
}

impl TrackerRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_caltrack_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let caltrack_dir = self.root.join(CALTRACK_DIR);

        if caltrack_dir.exists() {
            return Err(CaltrackError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&caltrack_dir)?;
        Ok(())
    }
}
