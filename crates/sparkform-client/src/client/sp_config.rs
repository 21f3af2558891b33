//! Configuration for the SparkPost HTTP client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default SparkPost API endpoint (US region).
pub const DEFAULT_BASE_URL: &str = "https://api.sparkpost.com";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the SparkPost HTTP client.
///
/// # Examples
///
/// ```ignore
/// use sparkform_client::SpConfig;
///
/// // US account with default settings
/// let config = SpConfig::new("my-api-key");
///
/// // EU account with a longer timeout
/// let config = SpConfig::new("my-api-key")
///     .with_base_url("https://api.eu.sparkpost.com")
///     .with_timeout(60);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SpConfig {
    /// SparkPost API key sent in the `Authorization` header
    #[cfg_attr(
        feature = "config",
        arg(
            long = "sparkpost-api-key",
            env = "SPARKPOST_API_KEY",
            hide_env_values = true,
            default_value = ""
        )
    )]
    pub api_key: String,

    /// Base URL of the SparkPost API
    #[cfg_attr(
        feature = "config",
        arg(
            long = "sparkpost-base-url",
            env = "SPARKPOST_BASE_URL",
            default_value = DEFAULT_BASE_URL
        )
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "sparkpost-timeout", env = "SPARKPOST_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "sparkpost-user-agent", env = "SPARKPOST_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for SpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl SpConfig {
    /// Create a new configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }

    /// Set the base URL of the SparkPost API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|agent| !agent.is_empty())
            .unwrap_or_else(|| format!("sparkform/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Parses the configured base URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL '{}' cannot be used as a base",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank or the base URL is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("SparkPost API key is required"));
        }

        self.parsed_base_url()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = SpConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SpConfig::new("key")
            .with_base_url("https://api.eu.sparkpost.com")
            .with_timeout(120)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.parsed_base_url().unwrap().host_str(), Some("api.eu.sparkpost.com"));
        assert_eq!(config.effective_timeout(), Duration::from_secs(120));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = SpConfig::new("key").with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_none() {
        let config = SpConfig::new("key");
        assert!(config.effective_user_agent().starts_with("sparkform/"));
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let error = SpConfig::new("  ").validate().unwrap_err();
        assert!(error.to_string().contains("API key"));
    }

    #[test]
    fn test_validate_rejects_invalid_url() {
        assert!(SpConfig::new("key").with_base_url("not a url").validate().is_err());
        assert!(SpConfig::new("key").with_base_url("mailto:ops@example.com").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", SpConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
