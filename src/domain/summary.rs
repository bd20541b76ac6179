//! Aggregate figures derived from the tracker state

/// Whether the running total has reached the calorie limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    WithinLimit,
    /// Remaining calories are zero or negative
    OverLimit,
}

impl LimitStatus {
    pub fn from_remaining(remaining: i64) -> Self {
        if remaining <= 0 {
            LimitStatus::OverLimit
        } else {
            LimitStatus::WithinLimit
        }
    }
}

/// Snapshot of every figure the presentation layer renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub limit: i64,
    pub total: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    pub percentage: f64,
    pub status: LimitStatus,
}

impl Summary {
    /// Build a summary from the stored scalars and the entry sums
    pub fn new(limit: i64, total: i64, consumed: i64, burned: i64) -> Self {
        let remaining = limit.saturating_sub(total);
        Summary {
            limit,
            total,
            consumed,
            burned,
            remaining,
            percentage: progress_percentage(total, limit),
            status: LimitStatus::from_remaining(remaining),
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.status == LimitStatus::OverLimit
    }
}

/// Share of the limit used so far, capped at 100 but never floored.
///
/// A zero limit yields 100 for a positive total and 0 otherwise.
pub fn progress_percentage(total: i64, limit: i64) -> f64 {
    if limit == 0 {
        return if total > 0 { 100.0 } else { 0.0 };
    }
    let percentage = total as f64 * 100.0 / limit as f64;
    percentage.min(100.0)
}
