//! Client-side API error type.
//!
//! Errors are normalized at the HTTP boundary: a response that arrived but
//! was non-2xx becomes [`ApiError::Http`] carrying the status plus whatever
//! the `{success, message, data}` envelope said; a request that never got a
//! response becomes [`ApiError::Network`] and carries no status at all. The
//! distinction matters to the registration state machine, which routes the
//! two classes to different user-facing messages.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Transport failure: the request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response, with the parsed error envelope where available.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },
    /// 2xx response whose body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Fallback text when an error body carries no usable message.
pub const GENERIC_HTTP_ERROR: &str = "Network response was not ok";

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
}

/// Pull the `message` out of an error-response body, if the body is the
/// standard envelope (or anything JSON with a top-level `message`).
pub fn envelope_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok()?;
    parsed.message.filter(|m| !m.trim().is_empty())
}

impl ApiError {
    /// Build an `Http` error from a raw status and body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let data = serde_json::from_str::<serde_json::Value>(body).ok();
        let message =
            envelope_message(body).unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string());
        ApiError::Http {
            status,
            message,
            data,
        }
    }

    /// HTTP status, when the error came from an actual response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, when one exists.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } if message != GENERIC_HTTP_ERROR => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Conflict detection: a 409 status, or a `statusCode: 409` nested in
    /// the error body (some endpoints wrap the real status that way).
    pub fn is_conflict(&self) -> bool {
        match self {
            ApiError::Http { status, data, .. } => {
                *status == 409
                    || data
                        .as_ref()
                        .and_then(|d| d.get("statusCode"))
                        .and_then(|v| v.as_u64())
                        == Some(409)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_envelope_message() {
        let err = ApiError::from_response(404, r#"{"success":false,"message":"Schedule not found"}"#);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), Some("Schedule not found"));
    }

    #[test]
    fn response_with_unparseable_body_falls_back() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
        match err {
            ApiError::Http { message, data, .. } => {
                assert_eq!(message, GENERIC_HTTP_ERROR);
                assert!(data.is_none());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn conflict_via_status_and_via_nested_status_code() {
        let direct = ApiError::from_response(409, r#"{"message":"already registered"}"#);
        assert!(direct.is_conflict());

        let nested =
            ApiError::from_response(400, r#"{"message":"duplicate","statusCode":409}"#);
        assert!(nested.is_conflict());

        let plain = ApiError::from_response(400, r#"{"message":"bad input"}"#);
        assert!(!plain.is_conflict());
    }

    #[test]
    fn network_errors_have_no_status() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_conflict());
    }
}
