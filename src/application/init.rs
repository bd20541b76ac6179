//! Initialize tracker use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, TrackerRepository};
use std::fs;
use std::path::Path;

/// Initialize a new tracker at the specified path.
pub fn init(path: &Path, default_limit: i64) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(default_limit);
    repo.save_config(&config)?;

    tracing::info!(root = %path.display(), default_limit, "tracker initialized");
    println!("Initialized caltrack tracker at {}", path.display());
    println!("Calorie limit: {}", default_limit);

    Ok(())
}
