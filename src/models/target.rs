//! The watch target and the mail account used to report on it.

use std::fmt;

use lettre::Address;
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the SMTP username, also used as the sender.
pub const ENV_USER_EMAIL: &str = "USER_EMAIL";
/// Environment variable holding the SMTP password.
pub const ENV_PASSWORD: &str = "PASSWORD";
/// Environment variable holding the notification recipient.
pub const ENV_EMAIL: &str = "EMAIL";
/// Environment variable holding the watched program code.
pub const ENV_CODE: &str = "CODE";
/// Environment variable holding the page to poll.
pub const ENV_URL: &str = "URL";

/// What to watch and who to tell. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Page carrying the result table
    pub url: String,

    /// Program code to look for, compared exactly
    pub code: String,

    /// Address that receives the notification
    pub recipient: String,
}

impl MonitorConfig {
    /// Build a config, rejecting empty fields and unparsable URLs.
    pub fn new(
        url: impl Into<String>,
        code: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            url: url.into(),
            code: code.into(),
            recipient: recipient.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the non-empty invariant, that the URL is absolute and that the
    /// recipient is a mail address.
    pub fn validate(&self) -> Result<()> {
        require(ENV_URL, &self.url)?;
        require(ENV_CODE, &self.code)?;
        require(ENV_EMAIL, &self.recipient)?;

        let parsed = Url::parse(&self.url)
            .map_err(|e| AppError::config(format!("{ENV_URL} is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "{ENV_URL} must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        self.recipient.parse::<Address>().map_err(|e| {
            AppError::config(format!(
                "{ENV_EMAIL} '{}' is not a mail address: {e}",
                self.recipient
            ))
        })?;
        Ok(())
    }
}

/// SMTP login. The password is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name, also the `From` address
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let credentials = Self {
            username: username.into(),
            password: password.into(),
        };
        require(ENV_USER_EMAIL, &credentials.username)?;
        require(ENV_PASSWORD, &credentials.password)?;
        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::config(format!("{name} is empty")));
    }
    Ok(())
}
