//! Terminal error classification
//!
//! Maps a non-success response that will not be retried into the SDK error
//! taxonomy, extracting a human-readable message from the known response
//! shapes.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::http::transport::RawResponse;

/// Top-level keys scanned for an error message, in priority order.
const MESSAGE_KEYS: [&str; 6] = [
    "message",
    "error",
    "detail",
    "Message",
    "errorMessage",
    "__type",
];

/// Classify a terminal response into an SDK error.
///
/// Returns `None` below 400; otherwise maps the status to an error kind
/// carrying the status code and the full parsed payload.
pub(crate) fn classify_terminal(response: &RawResponse) -> Option<Error> {
    if response.status < 400 {
        return None;
    }

    let payload = response.payload();
    let message = extract_error_message(&payload, response.status);
    let status_code = Some(response.status);
    let payload = Some(payload);

    let error = match response.status {
        401 | 403 => Error::Authentication {
            message,
            status_code,
            payload,
        },
        404 => Error::NotFound {
            message,
            status_code,
            payload,
        },
        429 => Error::RateLimit {
            message,
            status_code,
            payload,
        },
        _ => Error::Api {
            message,
            status_code,
            payload,
        },
    };
    Some(error)
}

/// Extract a message from the known error-response shapes.
///
/// Scans the top-level keys first, then the same keys inside a nested
/// `Output` object (API Gateway integrations wrap downstream errors
/// there), then the body verbatim when it is plain text.
fn extract_error_message(payload: &Value, status: u16) -> String {
    if let Value::Object(map) = payload {
        if let Some(message) = first_message_value(map) {
            return message;
        }
        match map.get("Output") {
            Some(Value::Object(nested)) => {
                if let Some(message) = first_message_value(nested) {
                    return message;
                }
            }
            Some(Value::String(nested)) if !nested.is_empty() => {
                return nested.clone();
            }
            _ => {}
        }
    }

    if let Value::String(text) = payload {
        if !text.is_empty() {
            return text.clone();
        }
    }
    format!("HTTP {}", status)
}

fn first_message_value(map: &Map<String, Value>) -> Option<String> {
    MESSAGE_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(value)) if !value.is_empty() => Some(value.clone()),
        _ => None,
    })
}
