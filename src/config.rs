// src/config.rs

//! Configuration loading utilities.
//!
//! The watch target and SMTP login come from the process environment and are
//! validated once at startup; any gap here is fatal. Tunables come from an
//! optional TOML file.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{
    Credentials, ENV_CODE, ENV_EMAIL, ENV_PASSWORD, ENV_URL, ENV_USER_EMAIL, MonitorConfig,
    Settings,
};

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Environment {
    pub target: MonitorConfig,
    pub credentials: Credentials,
}

impl Environment {
    /// Read and validate the required variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read and validate the required variables through `lookup`.
    ///
    /// All missing variables are reported together. A blank value counts as
    /// missing. Values are trimmed, except the password which is passed on
    /// as given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(|v| match name {
                    ENV_PASSWORD => v,
                    _ => v.trim().to_string(),
                })
        };

        let names = [ENV_USER_EMAIL, ENV_PASSWORD, ENV_EMAIL, ENV_CODE, ENV_URL];
        let values = names.map(|name| read(name));

        let missing: Vec<&str> = names
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let [user_email, password, email, code, url] = values.map(Option::unwrap_or_default);

        Ok(Self {
            target: MonitorConfig::new(url, code, email)?,
            credentials: Credentials::new(user_email, password)?,
        })
    }
}

/// Load a dotenv file into the process environment.
///
/// Variables already set in the environment win. With no explicit path, a
/// `.env` in the working directory is used if present.
#[cfg(feature = "cli")]
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                AppError::config(format!("Failed to load env file {}: {e}", path.display()))
            })?;
            log::debug!("Loaded environment from {}", path.display());
        }
        None => {
            if let Ok(found) = dotenvy::dotenv() {
                log::debug!("Loaded environment from {}", found.display());
            }
        }
    }
    Ok(())
}

/// Load and validate settings. A missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let settings = if path.exists() {
        Settings::load(path)?
    } else {
        log::warn!("No settings file at {}, using defaults", path.display());
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_USER_EMAIL, "sender@example.com".to_string()),
            (ENV_PASSWORD, "app-password".to_string()),
            (ENV_EMAIL, "me@example.com".to_string()),
            (ENV_CODE, " ABC123 ".to_string()),
            (ENV_URL, "https://example.com/results".to_string()),
        ])
    }

    #[test]
    fn test_from_lookup_reads_all_values() {
        let env = full_env();
        let loaded = Environment::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(loaded.target.url, "https://example.com/results");
        assert_eq!(loaded.target.code, "ABC123");
        assert_eq!(loaded.target.recipient, "me@example.com");
        assert_eq!(loaded.credentials.username, "sender@example.com");
    }

    #[test]
    fn test_from_lookup_keeps_password_verbatim() {
        let mut env = full_env();
        env.insert(ENV_PASSWORD, " pass phrase ".to_string());
        env.insert(ENV_USER_EMAIL, " sender@example.com\n".to_string());

        let loaded = Environment::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(loaded.credentials.password, " pass phrase ");
        assert_eq!(loaded.credentials.username, "sender@example.com");
    }

    #[test]
    fn test_from_lookup_reports_every_missing_variable() {
        let mut env = full_env();
        env.remove(ENV_CODE);
        env.insert(ENV_PASSWORD, "   ".to_string());

        let err = Environment::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        let message = err.to_string();
        assert!(err.is_startup());
        assert!(message.contains("PASSWORD"));
        assert!(message.contains("CODE"));
        assert!(!message.contains("URL"));
    }

    #[test]
    fn test_from_lookup_rejects_invalid_url() {
        let mut env = full_env();
        env.insert(ENV_URL, "not a url".to_string());

        let err = Environment::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = load_settings(&tmp.path().join("monitor.toml")).unwrap();
        assert_eq!(settings.schedule.peak_interval_secs, 600);
    }

    #[test]
    fn test_load_settings_rejects_invalid_values() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("monitor.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_load_settings_rejects_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("monitor.toml");
        std::fs::write(&path, "[fetch\n").unwrap();

        assert!(matches!(load_settings(&path), Err(AppError::Toml(_))));
    }
}
