// src/models/mod.rs

//! Domain models for the watcher.
//!
//! Settings come from TOML, the watch target from the environment, and the
//! per-poll types live only for one iteration of the cycle.

mod config;
mod result;
mod target;

// Re-export all public types
pub use config::{
    FetchConfig, LoggingConfig, MailConfig, ScheduleConfig, ScheduleMode, ServerConfig, Settings,
};
pub use result::{CODE_COLUMN, DATE_COLUMN, MIN_CELLS, MatchEvent, PollOutcome, ResultRow};
pub use target::{
    Credentials, ENV_CODE, ENV_EMAIL, ENV_PASSWORD, ENV_URL, ENV_USER_EMAIL, MonitorConfig,
};
