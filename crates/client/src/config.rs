//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then handed to
//! [`NotificationClient::new`](crate::NotificationClient::new). This crate never reads
//! environment variables itself; binaries do that and pass the values in.

use dengue_core::constants::DEFAULT_API_BASE_URL;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid request timeout {0:?}: expected a whole number of seconds")]
    InvalidTimeout(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Where the API lives and how long a request may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// A trailing `/` on `base_url` is dropped. `timeout` of `None` lets requests run until the
    /// server or the network ends them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not an absolute `http` or
    /// `https` URL.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve a path relative to the base URL, e.g. `dengue-notifications/3`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Parse a request timeout in seconds from an optional string value.
///
/// `None`, empty/whitespace, and `0` all mean "no timeout".
pub fn timeout_from_env_value(value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let secs: u64 = value
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;

    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:5000/api");
        assert_eq!(
            config.endpoint("dengue-notifications"),
            "http://localhost:5000/api/dengue-notifications"
        );
        assert!(config.timeout().is_none());
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ClientConfig::new("http://10.0.0.5:8080/api/", None).expect("valid");
        assert_eq!(config.endpoint("users/1"), "http://10.0.0.5:8080/api/users/1");
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            ClientConfig::new("localhost/api", None),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.org/api", None),
            Err(ConfigError::InvalidBaseUrl { reason, .. }) if reason.contains("ftp")
        ));
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(timeout_from_env_value(None).unwrap(), None);
        assert_eq!(timeout_from_env_value(Some("  ".into())).unwrap(), None);
        assert_eq!(timeout_from_env_value(Some("0".into())).unwrap(), None);
        assert_eq!(
            timeout_from_env_value(Some("30".into())).unwrap(),
            Some(Duration::from_secs(30))
        );
        assert!(matches!(
            timeout_from_env_value(Some("soon".into())),
            Err(ConfigError::InvalidTimeout(v)) if v == "soon"
        ));
    }
}
