//! Failure-message normalization
//!
//! The backend reports validation failures as `{"message": "..."}` or
//! `{"message": ["...", "..."]}`. Everything the client shows to a user goes
//! through [`normalize_message`], so callers get one string regardless of shape.

use serde_json::Value;

/// Message used when a failure carries nothing displayable
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Turn an optional failure body into a single display string.
///
/// - string `message`: returned verbatim
/// - array of strings: joined with `\n`
/// - anything else (no body, no field, empty string, mixed array): [`FALLBACK_MESSAGE`]
#[must_use]
pub fn normalize_message(body: Option<&Value>) -> String {
    let Some(message) = body.and_then(|b| b.get("message")) else {
        return FALLBACK_MESSAGE.to_string();
    };

    match message {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()
            .map_or_else(|| FALLBACK_MESSAGE.to_string(), |parts| parts.join("\n")),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

/// Normalize a raw response body; non-JSON bytes yield the fallback
#[must_use]
pub fn normalize_bytes(bytes: &[u8]) -> String {
    let body = serde_json::from_slice::<Value>(bytes).ok();
    normalize_message(body.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_string_message() {
        let body = json!({"message": "brand name already exists"});
        assert_eq!(normalize_message(Some(&body)), "brand name already exists");
    }

    #[test]
    fn test_array_message() {
        let body = json!({"message": ["name required", "price required"]});
        assert_eq!(
            normalize_message(Some(&body)),
            "name required\nprice required"
        );
    }

    #[test]
    fn test_missing_body_and_field() {
        assert_eq!(normalize_message(None), FALLBACK_MESSAGE);
        assert_eq!(normalize_message(Some(&json!({"error": "x"}))), FALLBACK_MESSAGE);
        assert_eq!(normalize_message(Some(&Value::Null)), FALLBACK_MESSAGE);
        assert_eq!(normalize_message(Some(&json!("plain"))), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_other_shapes_fall_back() {
        assert_eq!(normalize_message(Some(&json!({"message": 42}))), FALLBACK_MESSAGE);
        assert_eq!(normalize_message(Some(&json!({"message": ""}))), FALLBACK_MESSAGE);
        assert_eq!(
            normalize_message(Some(&json!({"message": {"field": "name"}}))),
            FALLBACK_MESSAGE
        );
        assert_eq!(
            normalize_message(Some(&json!({"message": ["ok", 1]}))),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_empty_array_joins_to_empty() {
        assert_eq!(normalize_message(Some(&json!({"message": []}))), "");
    }

    #[test]
    fn test_normalize_bytes() {
        assert_eq!(normalize_bytes(br#"{"message":"nope"}"#), "nope");
        assert_eq!(normalize_bytes(b"<html>502</html>"), FALLBACK_MESSAGE);
        assert_eq!(normalize_bytes(b""), FALLBACK_MESSAGE);
    }

    proptest! {
        #[test]
        fn prop_string_message_is_verbatim(s in ".+") {
            let body = json!({ "message": s.clone() });
            prop_assert_eq!(normalize_message(Some(&body)), s);
        }

        #[test]
        fn prop_array_message_joins_with_newline(items in prop::collection::vec(".*", 1..8)) {
            let body = json!({ "message": items.clone() });
            prop_assert_eq!(normalize_message(Some(&body)), items.join("\n"));
        }

        #[test]
        fn prop_body_without_message_falls_back(key in "[a-z_]{1,12}", n in any::<i64>()) {
            prop_assume!(key != "message");
            let mut map = serde_json::Map::new();
            map.insert(key, json!(n));
            let body = Value::Object(map);
            prop_assert_eq!(normalize_message(Some(&body)), FALLBACK_MESSAGE);
        }
    }
}
