//! Response envelope and request bodies

use crate::error::{ApiError, ApiResult};
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Full response: status, headers and decoded body
///
/// An empty body decodes as `null`; a body that is not JSON is kept as a string.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body
    pub body: Value,
}

impl Envelope {
    /// Read a `reqwest` response to completion
    pub async fn read(response: Response) -> ApiResult<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body with a top-level `data` member unwrapped
    #[must_use]
    pub fn into_data(self) -> Value {
        unwrap_data(self.body)
    }

    /// Raw status error carrying this response's body
    #[must_use]
    pub fn into_error(self) -> ApiError {
        ApiError::Status {
            status: self.status.as_u16(),
            body: (!self.body.is_null()).then_some(self.body),
        }
    }
}

/// Return the `data` member of an object body, or the body itself
#[must_use]
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Body of a POST request
#[derive(Debug)]
pub enum RequestBody {
    /// Sent as `application/json`
    Json(Value),
    /// Sent as `multipart/form-data`
    Multipart(Form),
}

impl RequestBody {
    /// Serialize any value as a JSON body
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Whether this body is a file form
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        Self::Multipart(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_data() {
        let body = json!({"data": [{"brand_id": 1, "brand_name": "Nike"}]});
        assert_eq!(unwrap_data(body), json!([{"brand_id": 1, "brand_name": "Nike"}]));

        assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
        assert_eq!(unwrap_data(json!({"items": []})), json!({"items": []}));
        assert_eq!(unwrap_data(json!({"data": null, "total": 0})), Value::Null);
    }

    #[test]
    fn test_into_error_drops_null_body() {
        let envelope = Envelope {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            body: Value::Null,
        };
        assert!(matches!(
            envelope.into_error(),
            ApiError::Status { status: 404, body: None }
        ));
    }

    #[test]
    fn test_request_body_kinds() {
        assert!(!RequestBody::from(json!({"brand_name": "Nike"})).is_multipart());
        let form = Form::new().text("product_name", "Air Max");
        assert!(RequestBody::from(form).is_multipart());
    }
}
