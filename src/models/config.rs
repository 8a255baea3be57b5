//! Application settings structures.
//!
//! Everything here is a tunable with a sensible default. Secrets and the
//! watch target itself come from the environment (see [`crate::config`]).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root settings, read from an optional TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Page retrieval behavior
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Sleep interval between polls
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Outbound mail settings
    #[serde(default)]
    pub mail: MailConfig,

    /// Liveness endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate settings values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        self.schedule.validate()?;
        if self.mail.smtp_host.trim().is_empty() {
            return Err(AppError::validation("mail.smtp_host is empty"));
        }
        if self.mail.smtp_port == 0 {
            return Err(AppError::validation("mail.smtp_port must be > 0"));
        }
        if self.mail.subject.trim().is_empty() {
            return Err(AppError::validation("mail.subject is empty"));
        }
        if self.mail.timeout_secs == 0 {
            return Err(AppError::validation("mail.timeout_secs must be > 0"));
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(AppError::validation(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for the page request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::fetch_timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::fetch_timeout(),
        }
    }
}

/// How the wait between polls is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// Short interval inside the peak window, long interval outside it
    #[default]
    Adaptive,
    /// Same interval at any time of day
    Fixed,
}

/// Poll interval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub mode: ScheduleMode,

    /// Offset of the reference timezone from UTC, in minutes (IST = 330)
    #[serde(default = "defaults::utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// First hour (inclusive) of the peak window, reference time
    #[serde(default = "defaults::peak_start_hour")]
    pub peak_start_hour: u32,

    /// Hour at which the peak window ends (exclusive), reference time
    #[serde(default = "defaults::peak_end_hour")]
    pub peak_end_hour: u32,

    #[serde(default = "defaults::peak_interval")]
    pub peak_interval_secs: u64,

    #[serde(default = "defaults::off_peak_interval")]
    pub off_peak_interval_secs: u64,

    /// Interval used when `mode = "fixed"`
    #[serde(default = "defaults::fixed_interval")]
    pub fixed_interval_secs: u64,
}

impl ScheduleConfig {
    fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(AppError::validation(
                "schedule.utc_offset_minutes must be within ±24h",
            ));
        }
        if self.peak_start_hour >= self.peak_end_hour || self.peak_end_hour > 24 {
            return Err(AppError::validation(format!(
                "schedule peak window {}..{} is not a valid hour range",
                self.peak_start_hour, self.peak_end_hour
            )));
        }
        if self.peak_interval_secs == 0 || self.off_peak_interval_secs == 0 {
            return Err(AppError::validation("schedule intervals must be > 0"));
        }
        if self.fixed_interval_secs == 0 {
            return Err(AppError::validation(
                "schedule.fixed_interval_secs must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            mode: ScheduleMode::default(),
            utc_offset_minutes: defaults::utc_offset_minutes(),
            peak_start_hour: defaults::peak_start_hour(),
            peak_end_hour: defaults::peak_end_hour(),
            peak_interval_secs: defaults::peak_interval(),
            off_peak_interval_secs: defaults::off_peak_interval(),
            fixed_interval_secs: defaults::fixed_interval(),
        }
    }
}

/// SMTP settings. Credentials are not stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    #[serde(default = "defaults::smtp_port")]
    pub smtp_port: u16,

    /// Subject line of the notification
    #[serde(default = "defaults::subject")]
    pub subject: String,

    /// Upper bound on a single SMTP exchange, in seconds
    #[serde(default = "defaults::mail_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: defaults::smtp_host(),
            smtp_port: defaults::smtp_port(),
            subject: defaults::subject(),
            timeout_secs: defaults::mail_timeout(),
        }
    }
}

/// Liveness endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "defaults::bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .into()
    }
    pub fn fetch_timeout() -> u64 {
        10
    }

    // Schedule defaults
    pub fn utc_offset_minutes() -> i32 {
        5 * 60 + 30
    }
    pub fn peak_start_hour() -> u32 {
        7
    }
    pub fn peak_end_hour() -> u32 {
        19
    }
    pub fn peak_interval() -> u64 {
        600
    }
    pub fn off_peak_interval() -> u64 {
        39600
    }
    pub fn fixed_interval() -> u64 {
        30
    }

    // Mail defaults
    pub fn smtp_host() -> String {
        "smtp.gmail.com".into()
    }
    pub fn smtp_port() -> u16 {
        587
    }
    pub fn subject() -> String {
        "Website Update Detected".into()
    }
    pub fn mail_timeout() -> u64 {
        30
    }

    // Server defaults
    pub fn bind() -> String {
        "0.0.0.0:8000".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
