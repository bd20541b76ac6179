//! Infrastructure layer - Storage, configuration and persistence

pub mod config;
pub mod repository;
pub mod settings;
pub mod store;

pub use config::Config;
pub use repository::{FileSystemRepository, TrackerRepository};
pub use settings::Settings;
pub use store::{FileStore, KeyValueStore, MemoryStore};
