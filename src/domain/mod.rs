//! Domain layer - Ledger entries, tracker and derived figures

pub mod entry;
pub mod summary;
pub mod tracker;

pub use entry::{Entry, EntryId, EntryKind};
pub use summary::{LimitStatus, Summary};
pub use tracker::{Tracker, TrackerEvent, TrackerObserver};
