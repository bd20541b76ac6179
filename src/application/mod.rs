//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod open_tracker;

pub use init::init;
pub use manage_config::ConfigService;
pub use open_tracker::open_tracker;
