//! Configuration for the admin-panel API client
//!
//! The only required setting is the backend origin. It is read once, from the
//! environment or a TOML file, when the client is built.

use crate::error::{ApiError, ApiResult, ErrorPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Default admin-panel backend origin
pub const DEFAULT_SERVER_URL: &str =
    "https://port-0-admin-panel-server-jvvy2blm7qb6m3.sel5.cloudtype.app";

/// Primary environment variable for the backend origin
pub const SERVER_URL_ENV: &str = "ADMIN_SERVER_URL";

/// Name the web front end used for the same value
const LEGACY_SERVER_URL_ENV: &str = "VITE_APP_SERVER_URL";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin every request path is appended to
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    #[serde(with = "timeout_secs")]
    pub timeout: Option<Duration>,
    /// Failure translation for non-`get` verbs
    pub error_policy: ErrorPolicy,
}

mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: None,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `ADMIN_SERVER_URL` or `VITE_APP_SERVER_URL`: backend origin
    /// - `ADMIN_TIMEOUT_SECS`: request timeout in seconds
    /// - `ADMIN_ERROR_POLICY`: `legacy` or `normalized`
    pub fn from_env() -> ApiResult<Self> {
        let base_url = env::var(SERVER_URL_ENV)
            .or_else(|_| env::var(LEGACY_SERVER_URL_ENV))
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let timeout = match env::var("ADMIN_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                ApiError::config(format!("ADMIN_TIMEOUT_SECS is not a number: {raw}"))
            })?)),
            Err(_) => None,
        };

        let error_policy = match env::var("ADMIN_ERROR_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => ErrorPolicy::default(),
        };

        Ok(Self {
            base_url,
            timeout,
            error_policy,
        })
    }

    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            ApiError::config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Builder-style method to set the backend origin
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder-style method to set the error policy
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Join a request path onto the origin with exactly one `/` between them
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "base_url must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.contains("admin-panel-server"));
        assert!(config.timeout.is_none());
        assert_eq!(config.error_policy, ErrorPolicy::Legacy);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:3000")
            .with_timeout(Duration::from_secs(5))
            .with_error_policy(ErrorPolicy::Normalized);

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(config.error_policy.normalizes_all());
    }

    #[test]
    fn test_url_for() {
        let config = ClientConfig::default().with_base_url("http://localhost:3000/");
        assert_eq!(config.url_for("brand"), "http://localhost:3000/brand");
        assert_eq!(config.url_for("/product/3"), "http://localhost:3000/product/3");
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(matches!(
            ClientConfig::default().with_base_url("ftp://x").validate(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://127.0.0.1:8080\"").unwrap();
        writeln!(file, "timeout = 15").unwrap();
        writeln!(file, "error_policy = \"normalized\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.error_policy, ErrorPolicy::Normalized);
    }

    #[test]
    fn test_from_file_partial_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://127.0.0.1:8080\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert!(config.timeout.is_none());
        assert_eq!(config.error_policy, ErrorPolicy::Legacy);
    }

    #[test]
    fn test_from_file_missing() {
        let err = ClientConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
