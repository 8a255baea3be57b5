// src/error.rs

//! Unified error handling for the watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (transport error or timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Mail address could not be parsed
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Mail message could not be built
    #[error("Mail build error: {0}")]
    MailBuild(#[from] lettre::error::Error),

    /// SMTP connection, authentication or delivery failed
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page could not be retrieved
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error with the offending URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error belongs to the startup configuration class.
    ///
    /// These abort the process before the first poll; every other class is
    /// recovered inside a single iteration.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::Toml(_) | Self::Url(_) | Self::Address(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = AppError::fetch("https://example.com", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "Fetch error for https://example.com: HTTP status 503"
        );
    }

    #[test]
    fn test_startup_classification() {
        assert!(AppError::config("URL is not set").is_startup());
        assert!(AppError::validation("fetch.timeout_secs must be > 0").is_startup());
        assert!(!AppError::fetch("https://example.com", "timed out").is_startup());
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!AppError::from(refused).is_startup());
    }
}
