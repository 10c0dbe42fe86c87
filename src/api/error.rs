//! Error type for the remote record client.
//!
//! Every failure of a round trip (unreachable server, non-2xx status,
//! unparseable body) collapses into a single [`TransportError`] whose
//! `Display` is the human-readable detail and nothing else.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct TransportError {
    pub detail: String,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Builds the error for a non-2xx response.
    ///
    /// Prefers the server's own `error` or `message` field when the body is
    /// JSON; otherwise reports the status code and any raw body text.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if let Some(reason) = server_reason(body) {
            return Self::new(reason);
        }
        let body = body.trim();
        if body.is_empty() {
            Self::new(format!("Request failed with status {}", status.as_u16()))
        } else {
            Self::new(format!(
                "Request failed with status {}: {body}",
                status.as_u16()
            ))
        }
    }
}

fn server_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_detail_verbatim() {
        let err = TransportError::new("network error");
        assert_eq!(err.to_string(), "network error");
    }

    #[test]
    fn status_with_json_error_field() {
        let err = TransportError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": "UNIQUE constraint failed: users.email"}"#,
        );
        assert_eq!(err.detail, "UNIQUE constraint failed: users.email");
    }

    #[test]
    fn status_with_json_message_field() {
        let err = TransportError::from_status(StatusCode::NOT_FOUND, r#"{"message": "User not found"}"#);
        assert_eq!(err.detail, "User not found");
    }

    #[test]
    fn status_with_plain_body() {
        let err = TransportError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.detail, "Request failed with status 502: upstream down");
    }

    #[test]
    fn status_with_empty_body() {
        let err = TransportError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.detail, "Request failed with status 500");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
    }
}
