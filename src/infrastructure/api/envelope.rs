//! Response envelope decoding shared by every endpoint.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::errors::ApiError;

/// Decodes a `{ ok, ...payload }` body into `T`.
///
/// A response fails when the status is not 2xx or the body says
/// `ok: false`. The error carries the body's `error` string, or
/// `HTTP <status>` when there is none.
///
/// # Errors
/// Returns [`ApiError::Server`], [`ApiError::Http`] or [`ApiError::Decode`].
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) if success => return Err(ApiError::decode(e.to_string())),
        Err(_) => return Err(ApiError::Http { status }),
    };

    let ok_flag = value.get("ok").and_then(Value::as_bool);
    if !success || ok_flag == Some(false) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty());
        return Err(match message {
            Some(message) => ApiError::server(status, message),
            None => ApiError::Http { status },
        });
    }

    serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api::dto::{DeletedResponse, ItemsResponse};
    use serde::de::IgnoredAny;
    use test_case::test_case;

    #[test_case(400, r#"{"ok":false,"error":"title é obrigatório"}"#, "title é obrigatório" ; "server message")]
    #[test_case(200, r#"{"ok":false,"error":"not allowed"}"#, "not allowed" ; "ok false on 2xx")]
    #[test_case(500, r#"{"ok":false}"#, "HTTP 500" ; "missing error field")]
    #[test_case(401, r#"{"ok":false,"error":""}"#, "HTTP 401" ; "empty error field")]
    #[test_case(502, "<html>bad gateway</html>", "HTTP 502" ; "non json error body")]
    fn test_failures(status: u16, body: &str, expected: &str) {
        let err = decode_envelope::<IgnoredAny>(status, body.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_missing_items_is_empty_list() {
        let response: ItemsResponse = decode_envelope(200, br#"{"ok":true}"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_task_without_status_defaults_to_pending() {
        let body = br#"{"ok":true,"items":[{"id":3,"title":"Ler","created_at":"2024-06-05T10:00:00"}]}"#;
        let response: ItemsResponse = decode_envelope(200, body).unwrap();

        assert_eq!(response.items.len(), 1);
        assert!(!response.items[0].status().is_done());
    }

    #[test]
    fn test_deleted_id() {
        let response: DeletedResponse =
            decode_envelope(200, br#"{"ok":true,"deleted_id":9}"#).unwrap();
        assert_eq!(response.deleted_id.as_u64(), 9);
    }

    #[test]
    fn test_garbage_success_body_is_decode_error() {
        let err = decode_envelope::<IgnoredAny>(200, b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
