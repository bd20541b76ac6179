//! Ledger entries (meals and workouts)

use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the ledger an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Calories consumed; adds to the running total
    Meal,
    /// Calories burned; subtracts from the running total
    Workout,
}

impl EntryKind {
    /// Sign applied to an entry's calories when it enters the total
    pub fn sign(&self) -> i64 {
        match self {
            EntryKind::Meal => 1,
            EntryKind::Workout => -1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Meal => "meal",
            EntryKind::Workout => "workout",
        }
    }
}

/// A single meal or workout record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    name: String,
    calories: i64,
}

impl Entry {
    /// Create an entry with a newly generated identifier
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Entry::with_id(EntryId::generate(), name, calories)
    }

    /// Create an entry with a known identifier
    pub fn with_id(id: EntryId, name: impl Into<String>, calories: i64) -> Self {
        Entry {
            id,
            name: name.into(),
            calories,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calories(&self) -> i64 {
        self.calories
    }
}
