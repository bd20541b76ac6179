//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod render;
pub mod session;

pub use commands::{Cli, Commands};
pub use output::{format_entry_list, format_summary};
pub use render::RenderObserver;
pub use session::{Session, SessionCommand};
