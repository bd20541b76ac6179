//! Redraws the tracker view whenever the tracker changes

use crate::cli::output::{format_event, format_summary};
use crate::domain::{Summary, TrackerEvent, TrackerObserver};
use std::cell::RefCell;
use std::rc::Rc;

/// Text queued for display, shared between the session and its renderer
pub type ViewBuffer = Rc<RefCell<String>>;

/// Observer that renders each change into a shared view buffer
pub struct RenderObserver {
    view: ViewBuffer,
}

impl RenderObserver {
    pub fn new(view: ViewBuffer) -> Self {
        RenderObserver { view }
    }
}

impl TrackerObserver for RenderObserver {
    fn on_change(&mut self, event: &TrackerEvent, summary: &Summary) {
        let mut view = self.view.borrow_mut();
        view.push_str(&format_event(event));
        view.push('\n');
        view.push_str(&format_summary(summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entry, Tracker};
    use crate::infrastructure::MemoryStore;

    #[test]
    fn test_renders_event_and_summary() {
        let view = ViewBuffer::default();
        let mut tracker = Tracker::new(MemoryStore::new()).unwrap();
        tracker.subscribe(Box::new(RenderObserver::new(view.clone())));

        tracker.add_meal(Entry::new("Breakfast", 400)).unwrap();

        let text = view.borrow();
        assert!(text.starts_with("Added meal 'Breakfast' (400 cal)\n"));
        assert!(text.contains("Remaining: 2100 [ok]"));
    }
}
