//! CLI command definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "caltrack")]
#[command(about = "Daily calorie and workout tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new tracker
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Calorie limit used until one is set
        #[arg(short, long, default_value_t = 2500, allow_negative_numbers = true)]
        limit: i64,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Show or set the daily calorie limit
    Limit {
        /// New limit (if provided, sets the limit)
        #[arg(allow_negative_numbers = true)]
        value: Option<String>,
    },

    /// Show calorie totals
    Status,

    /// Clear the running total
    Reset,

    /// Track meals and workouts interactively
    Session,
}
