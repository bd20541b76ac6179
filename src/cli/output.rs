//! Output formatting utilities

use crate::domain::{Entry, EntryKind, Summary, TrackerEvent};

/// Format the aggregate figures, marking the over-limit state
pub fn format_summary(summary: &Summary) -> String {
    let status = if summary.is_over_limit() {
        "OVER LIMIT"
    } else {
        "ok"
    };

    format!(
        "Limit:     {}\n\
        Total:     {}\n\
        Consumed:  {}\n\
        Burned:    {}\n\
        Remaining: {} [{}]\n\
        Progress:  {}\n",
        summary.limit,
        summary.total,
        summary.consumed,
        summary.burned,
        summary.remaining,
        status,
        format_progress(summary.percentage),
    )
}

/// Render a percentage as a 20-cell bar followed by the rounded value
pub fn format_progress(percentage: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        percentage
    )
}

/// One-line description of a tracker change
pub fn format_event(event: &TrackerEvent) -> String {
    match event {
        TrackerEvent::Added { kind, entry } => format!(
            "Added {} '{}' ({} cal)",
            kind.label(),
            entry.name(),
            entry.calories()
        ),
        TrackerEvent::Removed { kind, entry } => format!(
            "Removed {} '{}' ({} cal)",
            kind.label(),
            entry.name(),
            entry.calories()
        ),
        TrackerEvent::Reset => "Tracker reset".to_string(),
        TrackerEvent::LimitChanged { limit } => format!("Calorie limit set to {}", limit),
    }
}

/// Entries whose name contains `query`, ignoring case, paired with their
/// 1-based display position
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<(usize, &'a Entry)> {
    let query = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.name().to_lowercase().contains(&query))
        .map(|(index, entry)| (index + 1, entry))
        .collect()
}

/// Format a list of entries of one kind, optionally filtered by name
pub fn format_entry_list(kind: EntryKind, entries: &[Entry], query: Option<&str>) -> String {
    let shown = filter_entries(entries, query.unwrap_or(""));
    if shown.is_empty() {
        return format!("No {}s found\n", kind.label());
    }

    let mut output = String::new();
    for (position, entry) in shown {
        output.push_str(&format!(
            "{:>3}. {:<24} {:>6} cal  {}\n",
            position,
            entry.name(),
            entry.calories(),
            short_id(entry)
        ));
    }
    output
}

fn short_id(entry: &Entry) -> &str {
    let id = entry.id().as_str();
    id.get(..8).unwrap_or(id)
}
