//! Persisted scalar settings: calorie limit and running total

use crate::error::Result;
use crate::infrastructure::store::KeyValueStore;

/// Store key for the calorie limit
pub const CALORIE_LIMIT_KEY: &str = "calorieLimit";
/// Store key for the running calorie total
pub const TOTAL_CALORIES_KEY: &str = "totalCalories";

/// Limit used when nothing usable is stored
pub const DEFAULT_CALORIE_LIMIT: i64 = 2500;
/// Total used when nothing usable is stored
pub const DEFAULT_TOTAL_CALORIES: i64 = 0;

/// Typed access to the two scalars kept in a key-value store
#[derive(Debug, Clone)]
pub struct Settings<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Settings<S> {
    pub fn new(store: S) -> Self {
        Settings { store }
    }

    /// Stored calorie limit, or `default` when absent or not a number
    pub fn calorie_limit(&self, default: i64) -> Result<i64> {
        self.read_number(CALORIE_LIMIT_KEY, default)
    }

    pub fn set_calorie_limit(&mut self, limit: i64) -> Result<()> {
        self.store.set(CALORIE_LIMIT_KEY, &limit.to_string())
    }

    /// Stored running total, or `default` when absent or not a number
    pub fn total_calories(&self, default: i64) -> Result<i64> {
        self.read_number(TOTAL_CALORIES_KEY, default)
    }

    pub fn update_total_calories(&mut self, total: i64) -> Result<()> {
        self.store.set(TOTAL_CALORIES_KEY, &total.to_string())
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn read_number(&self, key: &str, default: i64) -> Result<i64> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(default);
        };

        match raw.trim().parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, default, "stored value is not a number");
                Ok(default)
            }
        }
    }
}
