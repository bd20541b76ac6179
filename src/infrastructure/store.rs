//! String-keyed key-value storage

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract persistent key-value store holding string values
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store. Cloning it simulates reopening persisted storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a TOML table of string values on disk.
///
/// The whole table is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store, and so is
    /// a file that no longer parses.
    pub fn open(path: &Path) -> Result<Self> {
        let values = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring unreadable store file"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(FileStore {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "store written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("calorieLimit").unwrap(), None);

        store.set("calorieLimit", "2000").unwrap();
        assert_eq!(store.get("calorieLimit").unwrap().as_deref(), Some("2000"));

        store.remove("calorieLimit").unwrap();
        assert_eq!(store.get("calorieLimit").unwrap(), None);

        // Removing again is fine
        store.remove("calorieLimit").unwrap();
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(&temp.path().join("storage.toml")).unwrap();
        assert_eq!(store.get("totalCalories").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".caltrack").join("storage.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set("totalCalories", "50").unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("totalCalories").unwrap().as_deref(),
            Some("50")
        );

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("totalCalories = \"50\""));
    }

    #[test]
    fn test_file_store_unparsable_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("calorieLimit").unwrap(), None);

        // Next write replaces the broken file
        store.set("calorieLimit", "1800").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("calorieLimit").unwrap().as_deref(),
            Some("1800")
        );
    }

    #[test]
    fn test_file_store_remove() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.toml");

        let mut store = FileStore::open(&path).unwrap();
        store.set("calorieLimit", "1800").unwrap();
        store.remove("calorieLimit").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("calorieLimit").unwrap(), None);
    }
}
