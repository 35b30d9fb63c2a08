//! Connection settings for the issue tracker.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

/// Default per-request timeout for tracker calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Problems with the tracker connection settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("missing {name}: pass --{flag} or set {env}")]
    Missing {
        /// Human name of the setting.
        name: &'static str,
        /// Command-line flag that sets it.
        flag: &'static str,
        /// Environment variable that sets it.
        env: &'static str,
    },
    /// The base URL could not be used.
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Where the tracker lives and how to authenticate against it.
///
/// Passed explicitly to the live adapter; nothing here is global.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    base_url: Url,
    email: String,
    api_token: String,
    timeout: Duration,
}

impl TrackerConfig {
    /// Builds a config from a base URL and basic-auth credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` does not parse
    /// or is not an `http(s)` URL.
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            reason,
        };
        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        Ok(Self {
            base_url: url,
            email: email.to_string(),
            api_token: api_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replaces the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL of an Agile REST 1.0 resource, e.g. `board/12/sprint`.
    #[must_use]
    pub fn agile_url(&self, resource: &str) -> String {
        format!(
            "{}/rest/agile/1.0/{}",
            self.base_url.as_str().trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    /// Account email used for basic auth.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// API token used for basic auth.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
