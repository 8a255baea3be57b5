//! Pipeline entry points for watcher operations.
//!
//! - `build_monitor`: Assemble the monitor from settings and environment
//! - `run_watch`: Poll forever in the foreground
//! - `run_watch_with_server`: Poll in the background behind a liveness endpoint
//! - `run_check`: Poll once

pub mod monitor;
pub mod schedule;
pub mod watch;

pub use monitor::Monitor;
pub use schedule::SleepPolicy;
#[cfg(feature = "server")]
pub use watch::run_watch_with_server;
pub use watch::{build_monitor, run_check, run_watch};
