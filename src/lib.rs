// src/lib.rs

//! Result watcher library.
//!
//! Polls a page holding a result table and sends an email when the watched
//! program code shows up with today's date.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod utils;
