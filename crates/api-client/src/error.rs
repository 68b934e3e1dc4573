//! Error types for the API client

use crate::normalize::{normalize_message, FALLBACK_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request failed, carrying the normalized display message
    #[error("{message}")]
    RequestFailed {
        /// HTTP status code, `None` when no response arrived
        status: Option<u16>,
        /// Normalized message
        message: String,
    },

    /// Backend answered outside the 2xx range (untranslated)
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Decoded response body, if it was JSON
        body: Option<Value>,
    },

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Tag does not name a cached collection
    #[error("Unknown tag: {0}")]
    UnknownTag(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a normalized request failure
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Translate a raw failure into [`ApiError::RequestFailed`].
    ///
    /// Already-normalized errors and local errors (config, JSON) pass through.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Status { status, body } => Self::RequestFailed {
                status: Some(status),
                message: normalize_message(body.as_ref()),
            },
            Self::Request(e) => Self::RequestFailed {
                status: e.status().map(|s| s.as_u16()),
                message: FALLBACK_MESSAGE.to_string(),
            },
            other => other,
        }
    }

    /// The message a user should see for this error, whatever the policy
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::RequestFailed { message, .. } => message.clone(),
            Self::Status { body, .. } => normalize_message(body.as_ref()),
            Self::Request(_) => FALLBACK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status associated with this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

/// How operations other than `get` report failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Only `get` normalizes; the other verbs surface raw status/transport errors
    #[default]
    Legacy,
    /// Every verb fails with [`ApiError::RequestFailed`]
    Normalized,
}

impl ErrorPolicy {
    /// Whether non-`get` operations translate failures
    #[must_use]
    pub fn normalizes_all(self) -> bool {
        matches!(self, Self::Normalized)
    }
}

impl FromStr for ErrorPolicy {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "raw" => Ok(Self::Legacy),
            "normalized" | "normalize" | "uniform" => Ok(Self::Normalized),
            other => Err(ApiError::config(format!("unknown error policy: {other}"))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Normalized => f.write_str("normalized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_status_error() {
        let err = ApiError::Status {
            status: 400,
            body: Some(json!({"message": ["name required", "price required"]})),
        };

        match err.normalize() {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "name required\nprice required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_keeps_local_errors() {
        let err = ApiError::config("bad").normalize();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_display_message() {
        let raw = ApiError::Status {
            status: 500,
            body: None,
        };
        assert_eq!(raw.display_message(), "An error occurred");

        let normalized = ApiError::request_failed(Some(404), "brand not found");
        assert_eq!(normalized.display_message(), "brand not found");
        assert_eq!(normalized.to_string(), "brand not found");
    }

    #[test]
    fn test_status_classification() {
        let client = ApiError::request_failed(Some(422), "invalid");
        assert!(client.is_client_error());
        assert!(!client.is_server_error());

        let server = ApiError::Status {
            status: 503,
            body: None,
        };
        assert!(server.is_server_error());

        assert!(ApiError::request_failed(None, "offline").status().is_none());
    }

    #[test]
    fn test_error_policy_parse() {
        assert_eq!("legacy".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Legacy);
        assert_eq!(
            "Normalized".parse::<ErrorPolicy>().unwrap(),
            ErrorPolicy::Normalized
        );
        assert!("strict".parse::<ErrorPolicy>().is_err());
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Legacy);
    }
}
