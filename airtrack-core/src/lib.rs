pub mod config;
pub mod core_identity;
pub mod core_store;
pub mod logging;
pub mod tracker;

pub use config::Config;
pub use logging::{init_logging, LogLevel};
pub use tracker::{Tracked, Tracker, TrackerError, TrackerResult};
