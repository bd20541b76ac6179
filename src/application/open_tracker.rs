//! Open the tracker of a tracker directory

use crate::domain::Tracker;
use crate::error::Result;
use crate::infrastructure::{FileStore, FileSystemRepository, TrackerRepository};

/// Open a tracker on the directory's store, using the configured limit as
/// the fallback when none has been stored yet.
pub fn open_tracker(repository: &FileSystemRepository) -> Result<Tracker<FileStore>> {
    let config = repository.load_config()?;
    let store = repository.open_store()?;
    Tracker::with_default_limit(store, config.default_limit)
}
