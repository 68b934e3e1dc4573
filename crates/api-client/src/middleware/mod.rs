//! Request/response interceptors
//!
//! Every request built by [`AdminClient`](crate::AdminClient) runs through an
//! ordered chain of [`Interceptor`]s. Hooks see the request before it is sent
//! and the outcome after it returns. They cannot swallow or rewrite a failure:
//! whatever a hook does, the original error is still what the caller gets.

use crate::normalize::{normalize_message, FALLBACK_MESSAGE};
use crate::response::Envelope;
use reqwest::{Method, RequestBuilder};
use tracing::{debug, warn};

/// What an interceptor knows about the request in flight
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Value of the `X-Request-ID` header
    pub request_id: &'a str,
    /// HTTP method
    pub method: &'a Method,
    /// Absolute request URL
    pub url: &'a str,
}

/// A failed exchange, as seen by interceptors
#[derive(Debug)]
pub enum Failure<'a> {
    /// The backend answered outside the 2xx range
    Status(&'a Envelope),
    /// No complete response arrived
    Transport(&'a reqwest::Error),
}

impl Failure<'_> {
    /// Display message for this failure
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status(envelope) => normalize_message(Some(&envelope.body)),
            Self::Transport(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// HTTP status, if a response arrived
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(envelope) => Some(envelope.status.as_u16()),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Hook into every request the client sends
///
/// All methods default to pass-through.
pub trait Interceptor: Send + Sync {
    /// Called before the request is sent
    fn on_request(&self, _ctx: &RequestContext<'_>, request: RequestBuilder) -> RequestBuilder {
        request
    }

    /// Called for every 2xx response
    fn on_response(&self, _ctx: &RequestContext<'_>, _envelope: &Envelope) {}

    /// Called for non-2xx responses and transport failures
    fn on_failure(&self, _ctx: &RequestContext<'_>, _failure: &Failure<'_>) {}
}

/// Request hook that forwards requests untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl Interceptor for PassThrough {}

/// Response hook that computes the normalized message of each failure and logs it
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeFailures;

impl Interceptor for NormalizeFailures {
    fn on_response(&self, ctx: &RequestContext<'_>, envelope: &Envelope) {
        debug!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            url = %ctx.url,
            status = envelope.status.as_u16(),
            "Response received"
        );
    }

    fn on_failure(&self, ctx: &RequestContext<'_>, failure: &Failure<'_>) {
        warn!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            url = %ctx.url,
            status = ?failure.status(),
            message = %failure.message(),
            "Request failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use serde_json::json;

    fn envelope(status: u16, body: serde_json::Value) -> Envelope {
        Envelope {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body,
        }
    }

    #[test]
    fn test_failure_message_from_status() {
        let env = envelope(400, json!({"message": ["a", "b"]}));
        let failure = Failure::Status(&env);
        assert_eq!(failure.message(), "a\nb");
        assert_eq!(failure.status(), Some(400));
    }

    #[test]
    fn test_failure_message_without_body() {
        let env = envelope(502, serde_json::Value::Null);
        assert_eq!(Failure::Status(&env).message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_pass_through_keeps_request() {
        let client = reqwest::Client::new();
        let method = Method::GET;
        let ctx = RequestContext {
            request_id: "req-1",
            method: &method,
            url: "http://localhost/brand",
        };

        let builder = client.get(ctx.url).header("x-test", "1");
        let request = PassThrough.on_request(&ctx, builder).build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost/brand");
        assert_eq!(request.headers()["x-test"], "1");
    }
}
