//! API client errors.

use serde_json::Value;
use thiserror::Error;

/// Longest raw-body excerpt carried in an error message.
pub const BODY_EXCERPT_CHARS: usize = 100;

/// Broad failure category of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never reached the backend or no response arrived.
    Transport,

    /// The backend rejected the credential (401/403).
    Unauthorized,

    /// The backend rejected the request (other 4xx).
    Rejected,

    /// The backend failed (5xx or any other non-success status).
    Server,

    /// A success response whose body did not match the expected schema.
    UnexpectedPayload,

    /// Input refused locally before any request was sent.
    Validation,

    /// The backend accepted the call but the local session could not be saved.
    Session,
}

/// Structured failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    message: String,
}

impl ApiError {
    /// Error of `kind` with an optional response status.
    pub fn new(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Error for a non-success response, preferring the body's own message.
    ///
    /// A body that is not JSON at all is quoted as an excerpt instead.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            400..=499 => ApiErrorKind::Rejected,
            _ => ApiErrorKind::Server,
        };

        let message = match serde_json::from_str::<Value>(body) {
            Ok(value) => extract_message(&value),
            Err(_) if body.trim().is_empty() => None,
            Err(_) => Some(format!("Unexpected response: {}", excerpt(body))),
        }
        .unwrap_or_else(|| format!("request failed with status {status}"));

        Self::new(kind, Some(status), message)
    }

    /// Error for a request that produced no response.
    #[must_use]
    pub fn transport(source: &reqwest::Error) -> Self {
        let message = if source.is_timeout() {
            "the server did not respond in time"
        } else {
            "could not reach the server"
        };

        Self::new(ApiErrorKind::Transport, None, message)
    }

    /// Error for a success response carrying an unusable body.
    #[must_use]
    pub fn unexpected_payload(status: u16, body: &str) -> Self {
        Self::new(
            ApiErrorKind::UnexpectedPayload,
            Some(status),
            format!("Unexpected response: {}", excerpt(body)),
        )
    }

    /// Local validation failure; nothing was sent.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, None, message)
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// HTTP status, when a response arrived.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Human readable message, shown verbatim to the admin.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the backend rejected the credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

fn extract_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_uses_body_message() {
        let error = ApiError::from_status(500, r#"{"message":"server error"}"#);

        assert_eq!(error.kind(), ApiErrorKind::Server);
        assert_eq!(error.status(), Some(500));
        assert_eq!(error.message(), "server error");
    }

    #[test]
    fn falls_back_to_error_field() {
        let error = ApiError::from_status(400, r#"{"error":"price is required"}"#);

        assert_eq!(error.kind(), ApiErrorKind::Rejected);
        assert_eq!(error.message(), "price is required");
    }

    #[test]
    fn non_json_error_body_is_quoted() {
        let error = ApiError::from_status(502, "<html><body>Bad Gateway from nginx</body></html>");

        assert_eq!(error.kind(), ApiErrorKind::Server);
        assert_eq!(error.status(), Some(502));
        assert_eq!(
            error.message(),
            "Unexpected response: <html><body>Bad Gateway from nginx</body></html>"
        );
    }

    #[test]
    fn long_non_json_error_body_is_truncated() {
        let body = "y".repeat(300);
        let error = ApiError::from_status(404, &body);

        assert_eq!(error.kind(), ApiErrorKind::Rejected);
        assert_eq!(
            error.message().len(),
            "Unexpected response: ".len() + BODY_EXCERPT_CHARS
        );
    }

    #[test]
    fn generic_message_for_blank_or_messageless_body() {
        assert_eq!(
            ApiError::from_status(502, "  ").message(),
            "request failed with status 502"
        );
        assert_eq!(
            ApiError::from_status(502, r#"{"ok":false}"#).message(),
            "request failed with status 502"
        );
    }

    #[test]
    fn blank_message_is_ignored() {
        let error = ApiError::from_status(404, r#"{"message":"  "}"#);

        assert_eq!(error.message(), "request failed with status 404");
    }

    #[test]
    fn unauthorized_statuses_are_classified() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
    }

    #[test]
    fn unexpected_payload_truncates_body() {
        let body = "x".repeat(250);
        let error = ApiError::unexpected_payload(200, &body);

        assert_eq!(error.kind(), ApiErrorKind::UnexpectedPayload);
        assert_eq!(
            error.message().len(),
            "Unexpected response: ".len() + BODY_EXCERPT_CHARS
        );
    }
}
