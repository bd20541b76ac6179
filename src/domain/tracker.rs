//! Calorie ledger: entries, running total and limit

use crate::domain::entry::{Entry, EntryId, EntryKind};
use crate::domain::summary::{progress_percentage, Summary};
use crate::error::{CaltrackError, Result};
use crate::infrastructure::settings::{Settings, DEFAULT_CALORIE_LIMIT, DEFAULT_TOTAL_CALORIES};
use crate::infrastructure::store::KeyValueStore;

/// A state change the tracker has just applied
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Added { kind: EntryKind, entry: Entry },
    Removed { kind: EntryKind, entry: Entry },
    Reset,
    LimitChanged { limit: i64 },
}

/// Receives a notification after every tracker mutation
pub trait TrackerObserver {
    fn on_change(&mut self, event: &TrackerEvent, summary: &Summary);
}

/// In-memory ledger of one day's meals and workouts.
///
/// The limit and the running total are written through to the store on every
/// change. The entry lists live only as long as the tracker does, so a
/// tracker reopened on the same store starts with the old total and no
/// entries.
pub struct Tracker<S: KeyValueStore> {
    settings: Settings<S>,
    calorie_limit: i64,
    total_calories: i64,
    meals: Vec<Entry>,
    workouts: Vec<Entry>,
    observers: Vec<Box<dyn TrackerObserver>>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Open a tracker on `store`, falling back to the built-in limit
    pub fn new(store: S) -> Result<Self> {
        Self::with_default_limit(store, DEFAULT_CALORIE_LIMIT)
    }

    /// Open a tracker on `store`, falling back to `default_limit` when the
    /// store holds no usable limit
    pub fn with_default_limit(store: S, default_limit: i64) -> Result<Self> {
        let settings = Settings::new(store);
        let calorie_limit = settings.calorie_limit(default_limit)?;
        let total_calories = settings.total_calories(DEFAULT_TOTAL_CALORIES)?;

        tracing::debug!(calorie_limit, total_calories, "tracker opened");

        Ok(Tracker {
            settings,
            calorie_limit,
            total_calories,
            meals: Vec::new(),
            workouts: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Register an observer; observers are notified in subscription order
    pub fn subscribe(&mut self, observer: Box<dyn TrackerObserver>) {
        self.observers.push(observer);
    }

    pub fn add_meal(&mut self, meal: Entry) -> Result<()> {
        self.add(EntryKind::Meal, meal)
    }

    pub fn add_workout(&mut self, workout: Entry) -> Result<()> {
        self.add(EntryKind::Workout, workout)
    }

    /// Remove the first meal with this id. Unknown ids leave everything as is.
    pub fn remove_meal(&mut self, id: &EntryId) -> Result<Option<Entry>> {
        self.remove(EntryKind::Meal, id)
    }

    /// Remove the first workout with this id. Unknown ids leave everything as is.
    pub fn remove_workout(&mut self, id: &EntryId) -> Result<Option<Entry>> {
        self.remove(EntryKind::Workout, id)
    }

    /// Clear both lists and the running total. The limit is kept.
    pub fn reset(&mut self) -> Result<()> {
        self.total_calories = 0;
        self.meals.clear();
        self.workouts.clear();
        self.settings.update_total_calories(self.total_calories)?;

        tracing::debug!("tracker reset");
        self.notify(TrackerEvent::Reset);
        Ok(())
    }

    pub fn set_limit(&mut self, limit: i64) -> Result<()> {
        self.calorie_limit = limit;
        self.settings.set_calorie_limit(limit)?;

        tracing::debug!(limit, "calorie limit changed");
        self.notify(TrackerEvent::LimitChanged { limit });
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        self.calorie_limit
    }

    /// Running total: meals minus workouts
    pub fn total(&self) -> i64 {
        self.total_calories
    }

    /// Sum of meal calories, saturating at the `i64` bounds
    pub fn consumed(&self) -> i64 {
        saturating_sum(&self.meals)
    }

    /// Sum of workout calories, saturating at the `i64` bounds
    pub fn burned(&self) -> i64 {
        saturating_sum(&self.workouts)
    }

    pub fn remaining(&self) -> i64 {
        self.calorie_limit.saturating_sub(self.total_calories)
    }

    pub fn progress_percentage(&self) -> f64 {
        progress_percentage(self.total_calories, self.calorie_limit)
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining() <= 0
    }

    pub fn meals(&self) -> &[Entry] {
        &self.meals
    }

    pub fn workouts(&self) -> &[Entry] {
        &self.workouts
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Meal => &self.meals,
            EntryKind::Workout => &self.workouts,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::new(
            self.calorie_limit,
            self.total_calories,
            self.consumed(),
            self.burned(),
        )
    }

    /// Release the underlying store
    pub fn into_store(self) -> S {
        self.settings.into_store()
    }

    fn add(&mut self, kind: EntryKind, entry: Entry) -> Result<()> {
        self.total_calories = self.shifted_total(kind, entry.calories(), 1)?;
        self.entries_mut(kind).push(entry.clone());
        self.settings.update_total_calories(self.total_calories)?;

        tracing::debug!(
            kind = kind.label(),
            id = %entry.id(),
            calories = entry.calories(),
            total = self.total_calories,
            "entry added"
        );
        self.notify(TrackerEvent::Added { kind, entry });
        Ok(())
    }

    fn remove(&mut self, kind: EntryKind, id: &EntryId) -> Result<Option<Entry>> {
        let Some(index) = self.entries(kind).iter().position(|e| e.id() == id) else {
            tracing::debug!(kind = kind.label(), %id, "no entry with this id");
            return Ok(None);
        };

        let total = self.shifted_total(kind, self.entries(kind)[index].calories(), -1)?;
        let entry = self.entries_mut(kind).remove(index);
        self.total_calories = total;
        self.settings.update_total_calories(self.total_calories)?;

        tracing::debug!(
            kind = kind.label(),
            %id,
            total = self.total_calories,
            "entry removed"
        );
        self.notify(TrackerEvent::Removed {
            kind,
            entry: entry.clone(),
        });
        Ok(Some(entry))
    }

    /// Total after applying `calories` of `kind` in `direction` (1 adds the
    /// entry, -1 takes it back). Out-of-range results are rejected.
    fn shifted_total(&self, kind: EntryKind, calories: i64, direction: i64) -> Result<i64> {
        (kind.sign() * direction)
            .checked_mul(calories)
            .and_then(|delta| self.total_calories.checked_add(delta))
            .ok_or_else(|| {
                CaltrackError::InvalidInput(format!(
                    "{} calories would take the total out of range",
                    calories
                ))
            })
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::Meal => &mut self.meals,
            EntryKind::Workout => &mut self.workouts,
        }
    }

    fn notify(&mut self, event: TrackerEvent) {
        let summary = self.summary();
        for observer in self.observers.iter_mut() {
            observer.on_change(&event, &summary);
        }
    }
}

fn saturating_sum(entries: &[Entry]) -> i64 {
    entries
        .iter()
        .fold(0i64, |sum, entry| sum.saturating_add(entry.calories()))
}
