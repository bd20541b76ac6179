//! Interactive tracking session
//!
//! Reads one command per line, forwards it to the tracker and prints whatever
//! the tracker's renderer queued. Input is validated here, before the tracker
//! is called.

use crate::cli::output::{format_entry_list, format_summary};
use crate::cli::render::{RenderObserver, ViewBuffer};
use crate::domain::{Entry, EntryId, EntryKind, Tracker};
use crate::error::{CaltrackError, Result};
use crate::infrastructure::KeyValueStore;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  meal <name> <calories>        record a meal
  workout <name> <calories>     record a workout
  delete meal|workout <n|id>    remove an entry by list position or id
  filter meal|workout [text]    list entries whose name contains text
  list                          list all entries
  limit <calories>              set the daily calorie limit
  status                        show totals
  reset                         clear all entries and the total
  help                          show this help
  quit                          leave the session
";

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add {
        kind: EntryKind,
        name: String,
        calories: i64,
    },
    Delete {
        kind: EntryKind,
        target: String,
    },
    Filter {
        kind: EntryKind,
        query: String,
    },
    List,
    Limit(i64),
    Status,
    Reset,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb.to_lowercase().as_str() {
            "meal" => parse_add(EntryKind::Meal, &rest)?,
            "workout" => parse_add(EntryKind::Workout, &rest)?,
            "delete" | "remove" => {
                let (kind, target) = match rest.as_slice() {
                    [kind, target] => (parse_kind(kind)?, target.to_string()),
                    _ => {
                        return Err(CaltrackError::InvalidInput(
                            "Usage: delete meal|workout <position|id>".to_string(),
                        ))
                    }
                };
                SessionCommand::Delete { kind, target }
            }
            "filter" => {
                let Some((kind, query)) = rest.split_first() else {
                    return Err(CaltrackError::InvalidInput(
                        "Usage: filter meal|workout [text]".to_string(),
                    ));
                };
                SessionCommand::Filter {
                    kind: parse_kind(kind)?,
                    query: query.join(" "),
                }
            }
            "list" => SessionCommand::List,
            "limit" => match rest.as_slice() {
                [value] => SessionCommand::Limit(parse_calories(value)?),
                _ => {
                    return Err(CaltrackError::InvalidInput(
                        "Usage: limit <calories>".to_string(),
                    ))
                }
            },
            "status" => SessionCommand::Status,
            "reset" => SessionCommand::Reset,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => {
                return Err(CaltrackError::InvalidInput(format!(
                    "Unknown command: '{}'. Type 'help' for a list of commands",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

/// Parse a calorie amount typed by the user
pub fn parse_calories(value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        CaltrackError::InvalidInput(format!("Calories must be a whole number: '{}'", value))
    })
}

fn parse_kind(word: &str) -> Result<EntryKind> {
    match word.to_lowercase().as_str() {
        "meal" | "meals" => Ok(EntryKind::Meal),
        "workout" | "workouts" => Ok(EntryKind::Workout),
        _ => Err(CaltrackError::InvalidInput(format!(
            "Expected 'meal' or 'workout', got '{}'",
            word
        ))),
    }
}

fn parse_add(kind: EntryKind, words: &[&str]) -> Result<SessionCommand> {
    let Some((calories, name)) = words.split_last() else {
        return Err(CaltrackError::InvalidInput(
            "Please fill in all fields".to_string(),
        ));
    };
    if name.is_empty() {
        return Err(CaltrackError::InvalidInput(
            "Please fill in all fields".to_string(),
        ));
    }

    Ok(SessionCommand::Add {
        kind,
        name: name.join(" "),
        calories: parse_calories(calories)?,
    })
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A tracker wired to a text view
pub struct Session<S: KeyValueStore> {
    tracker: Tracker<S>,
    view: ViewBuffer,
}

impl<S: KeyValueStore> Session<S> {
    /// Attach a renderer to `tracker` and start with the current totals
    pub fn new(mut tracker: Tracker<S>) -> Self {
        let view = ViewBuffer::default();
        tracker.subscribe(Box::new(RenderObserver::new(view.clone())));
        view.borrow_mut()
            .push_str(&format_summary(&tracker.summary()));
        Session { tracker, view }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    /// Apply one command to the tracker
    pub fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Add {
                kind,
                name,
                calories,
            } => {
                let entry = Entry::new(name, calories);
                match kind {
                    EntryKind::Meal => self.tracker.add_meal(entry)?,
                    EntryKind::Workout => self.tracker.add_workout(entry)?,
                }
            }
            SessionCommand::Delete { kind, target } => {
                let id = self.resolve_target(kind, &target);
                let removed = match kind {
                    EntryKind::Meal => self.tracker.remove_meal(&id)?,
                    EntryKind::Workout => self.tracker.remove_workout(&id)?,
                };
                if removed.is_none() {
                    self.write(&format!("No {} matches '{}'\n", kind.label(), target));
                }
            }
            SessionCommand::Filter { kind, query } => {
                let list = format_entry_list(kind, self.tracker.entries(kind), Some(&query));
                self.write(&list);
            }
            SessionCommand::List => {
                let meals = format_entry_list(EntryKind::Meal, self.tracker.meals(), None);
                let workouts =
                    format_entry_list(EntryKind::Workout, self.tracker.workouts(), None);
                self.write(&format!("Meals:\n{}Workouts:\n{}", meals, workouts));
            }
            SessionCommand::Limit(limit) => self.tracker.set_limit(limit)?,
            SessionCommand::Status => {
                let summary = format_summary(&self.tracker.summary());
                self.write(&summary);
            }
            SessionCommand::Reset => self.tracker.reset()?,
            SessionCommand::Help => self.write(HELP),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Parse and apply one input line. Invalid input, including amounts the
    /// tracker refuses, is reported in the view and leaves the tracker as is.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let result = SessionCommand::parse(line).and_then(|command| match command {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue),
        });

        match result {
            Err(CaltrackError::InvalidInput(msg)) => {
                self.write(&format!("Error: {}\n", msg));
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    /// Drain everything rendered since the last call
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut *self.view.borrow_mut())
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        output.write_all(self.take_output().as_bytes())?;
        output.flush()?;

        for line in input.lines() {
            let flow = self.handle_line(&line?)?;
            output.write_all(self.take_output().as_bytes())?;
            output.flush()?;

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    fn write(&self, text: &str) {
        self.view.borrow_mut().push_str(text);
    }

    /// Map a list position, full id or unique id prefix to an entry id.
    /// A number in range is a position; otherwise it is tried as an id.
    /// Anything unmatched is passed through unchanged.
    fn resolve_target(&self, kind: EntryKind, target: &str) -> EntryId {
        let entries = self.tracker.entries(kind);

        let by_position = target
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|i| entries.get(i));
        if let Some(entry) = by_position {
            return entry.id().clone();
        }

        let mut matches = entries
            .iter()
            .filter(|entry| entry.id().as_str().starts_with(target));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => entry.id().clone(),
            _ => EntryId::from(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn session() -> Session<MemoryStore> {
        let mut session = Session::new(Tracker::new(MemoryStore::new()).unwrap());
        session.take_output();
        session
    }

    #[test]
    fn test_parse_meal_with_multiword_name() {
        let command = SessionCommand::parse("meal Big Breakfast 400").unwrap();
        assert_eq!(
            command,
            Some(SessionCommand::Add {
                kind: EntryKind::Meal,
                name: "Big Breakfast".to_string(),
                calories: 400,
            })
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(SessionCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_missing_fields() {
        for line in ["meal", "meal 400", "workout"] {
            match SessionCommand::parse(line) {
                Err(CaltrackError::InvalidInput(msg)) => {
                    assert_eq!(msg, "Please fill in all fields")
                }
                other => panic!("Expected InvalidInput for '{line}', got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_bad_calories() {
        assert!(matches!(
            SessionCommand::parse("meal Lunch lots"),
            Err(CaltrackError::InvalidInput(_))
        ));
        assert!(matches!(
            SessionCommand::parse("limit 12.5"),
            Err(CaltrackError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(
            SessionCommand::parse("delete workout 2").unwrap(),
            Some(SessionCommand::Delete {
                kind: EntryKind::Workout,
                target: "2".to_string()
            })
        );
        assert_eq!(
            SessionCommand::parse("filter meals chicken salad").unwrap(),
            Some(SessionCommand::Filter {
                kind: EntryKind::Meal,
                query: "chicken salad".to_string()
            })
        );
        assert_eq!(
            SessionCommand::parse("limit -100").unwrap(),
            Some(SessionCommand::Limit(-100))
        );
        assert_eq!(
            SessionCommand::parse("EXIT").unwrap(),
            Some(SessionCommand::Quit)
        );
        assert!(SessionCommand::parse("dance").is_err());
    }

    #[test]
    fn test_add_and_render() {
        let mut session = session();
        session.handle_line("meal Breakfast 400").unwrap();

        let output = session.take_output();
        assert!(output.contains("Added meal 'Breakfast' (400 cal)"));
        assert!(output.contains("Remaining: 2100 [ok]"));
        assert_eq!(session.tracker().consumed(), 400);
    }

    #[test]
    fn test_invalid_input_does_not_touch_tracker() {
        let mut session = session();
        let flow = session.handle_line("meal Breakfast").unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            session.take_output(),
            "Error: Please fill in all fields\n"
        );
        assert!(session.tracker().meals().is_empty());
    }

    #[test]
    fn test_delete_by_position_and_id() {
        let mut session = session();
        session.handle_line("meal Breakfast 400").unwrap();
        session.handle_line("meal Lunch 700").unwrap();
        session.handle_line("workout Run 350").unwrap();

        session.handle_line("delete meal 1").unwrap();
        assert_eq!(session.tracker().meals().len(), 1);
        assert_eq!(session.tracker().meals()[0].name(), "Lunch");

        let run_id = session.tracker().workouts()[0].id().to_string();
        session
            .handle_line(&format!("delete workout {}", run_id))
            .unwrap();
        assert!(session.tracker().workouts().is_empty());
        assert_eq!(session.tracker().total(), 700);
    }

    #[test]
    fn test_delete_unknown_reports_and_keeps_state() {
        let mut tracker = Tracker::new(MemoryStore::new()).unwrap();
        tracker
            .add_meal(Entry::with_id(EntryId::from("abcdef01"), "Breakfast", 400))
            .unwrap();
        let mut session = Session::new(tracker);
        session.take_output();

        session.handle_line("delete meal 7").unwrap();
        assert_eq!(session.take_output(), "No meal matches '7'\n");
        assert_eq!(session.tracker().total(), 400);
    }

    #[test]
    fn test_filter_lists_matches() {
        let mut session = session();
        session.handle_line("meal Breakfast 400").unwrap();
        session.handle_line("meal Lunch 700").unwrap();
        session.take_output();

        session.handle_line("filter meal lun").unwrap();
        let output = session.take_output();
        assert!(output.contains("2. Lunch"));
        assert!(!output.contains("Breakfast"));
    }

    #[test]
    fn test_over_limit_is_marked() {
        let mut session = session();
        session.handle_line("meal Feast 3000").unwrap();
        assert!(session.take_output().contains("Remaining: -500 [OVER LIMIT]"));
    }

    #[test]
    fn test_run_until_quit() {
        let mut session = Session::new(Tracker::new(MemoryStore::new()).unwrap());
        let input = "meal Breakfast 400\nworkout Run 350\nquit\nmeal Ignored 999\n";
        let mut output = Vec::new();

        session.run(input.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Limit:     2500"));
        assert!(output.contains("Added workout 'Run' (350 cal)"));
        assert!(!output.contains("Ignored"));
        assert_eq!(session.tracker().total(), 50);
        assert_eq!(session.tracker().remaining(), 2450);
    }

    #[test]
    fn test_out_of_range_amount_is_reported() {
        let mut session = session();
        session.handle_line("meal Big 9223372036854775807").unwrap();
        session.take_output();

        let flow = session.handle_line("meal More 1").unwrap();

        assert_eq!(flow, Flow::Continue);
        let output = session.take_output();
        assert!(output.starts_with("Error: 1 calories would take the total out of range"));
        assert_eq!(session.tracker().total(), i64::MAX);
        assert_eq!(session.tracker().meals().len(), 1);

        session
            .handle_line("workout Odd -9223372036854775808")
            .unwrap();
        assert!(session.take_output().starts_with("Error: "));
        assert!(session.tracker().workouts().is_empty());
    }

    #[test]
    fn test_delete_by_numeric_id_prefix() {
        let mut tracker = Tracker::new(MemoryStore::new()).unwrap();
        tracker
            .add_meal(Entry::with_id(
                EntryId::from("12345678abcdef0012345678abcdef00"),
                "Breakfast",
                400,
            ))
            .unwrap();
        let mut session = Session::new(tracker);
        session.take_output();

        session.handle_line("delete meal 12345678").unwrap();

        assert!(session.take_output().contains("Removed meal 'Breakfast'"));
        assert!(session.tracker().meals().is_empty());
    }
}
