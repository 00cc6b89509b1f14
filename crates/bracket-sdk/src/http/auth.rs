//! Credential header merging
//!
//! Pure function; never mutates the caller's map. Caller-supplied headers
//! are attempt-scoped, so the executor re-applies this on every attempt.

use std::collections::HashMap;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the optional client identifier.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Merge credential headers into a copy of the caller-supplied headers.
///
/// The API key header is always set; the client-id header only when a
/// non-empty `client_id` is given.
pub fn apply_auth_headers(
    headers: Option<&HashMap<String, String>>,
    api_key: &str,
    client_id: Option<&str>,
) -> HashMap<String, String> {
    let mut merged = headers.cloned().unwrap_or_default();
    if !api_key.is_empty() {
        merged.insert(API_KEY_HEADER.to_string(), api_key.to_string());
    }
    if let Some(client_id) = client_id {
        if !client_id.is_empty() {
            merged.insert(CLIENT_ID_HEADER.to_string(), client_id.to_string());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_api_key_header() {
        let merged = apply_auth_headers(None, "test-key", None);
        assert_eq!(merged.get(API_KEY_HEADER).unwrap(), "test-key");
        assert!(!merged.contains_key(CLIENT_ID_HEADER));
    }

    #[test]
    fn test_sets_client_id_only_when_non_empty() {
        let with_id = apply_auth_headers(None, "test-key", Some("svc-1"));
        assert_eq!(with_id.get(CLIENT_ID_HEADER).unwrap(), "svc-1");

        let empty_id = apply_auth_headers(None, "test-key", Some(""));
        assert!(!empty_id.contains_key(CLIENT_ID_HEADER));
    }

    #[test]
    fn test_preserves_caller_headers_without_mutation() {
        let mut original = HashMap::new();
        original.insert("x-request-id".to_string(), "abc".to_string());

        let merged = apply_auth_headers(Some(&original), "test-key", None);

        assert_eq!(merged.get("x-request-id").unwrap(), "abc");
        assert_eq!(merged.get(API_KEY_HEADER).unwrap(), "test-key");
        // Caller's map is untouched.
        assert_eq!(original.len(), 1);
        assert!(!original.contains_key(API_KEY_HEADER));
    }

    #[test]
    fn test_credential_overrides_caller_supplied_key() {
        let mut original = HashMap::new();
        original.insert(API_KEY_HEADER.to_string(), "stale".to_string());

        let merged = apply_auth_headers(Some(&original), "fresh", None);
        assert_eq!(merged.get(API_KEY_HEADER).unwrap(), "fresh");
    }
}
