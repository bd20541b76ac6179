//! caltrack - Daily calorie and workout tracker
//!
//! Records meals and workouts against a daily calorie limit. The limit and
//! the running total are kept in a small key-value store next to the tracker;
//! the meal and workout lists live for one session only.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::CaltrackError;
