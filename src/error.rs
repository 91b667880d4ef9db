use reqwest::StatusCode;
use thiserror::Error;

use crate::constants::API_KEY_ENV;

/// Errors raised while talking to the Cleverbot API.
///
/// Two classes matter to callers: transport failures (the server could not be
/// reached or refused the request) and parse failures (the server answered
/// with something that is not a reply). See [`CleverbotError::is_transport`]
/// and [`CleverbotError::is_parse`].
#[derive(Debug, Error)]
pub enum CleverbotError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request to Cleverbot failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", describe_status(.status, .body))]
    Status { status: StatusCode, body: String },

    #[error("Cleverbot returned an empty response body")]
    EmptyBody,

    #[error("Malformed Cleverbot reply: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CleverbotError {
    /// The server was unreachable, timed out, or answered with a non-2xx status.
    pub fn is_transport(&self) -> bool {
        matches!(self, CleverbotError::Transport(_) | CleverbotError::Status { .. })
    }

    /// The server answered 2xx but the body was not a usable reply.
    pub fn is_parse(&self) -> bool {
        matches!(self, CleverbotError::EmptyBody | CleverbotError::Parse(_))
    }

    /// HTTP status of a rejected request, if that is what happened.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CleverbotError::Status { status, .. } => Some(*status),
            CleverbotError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

fn describe_status(status: &StatusCode, body: &str) -> String {
    match status.as_u16() {
        401 => format!(
            "Authentication failed (401). Check the API key (--key or {}).",
            API_KEY_ENV
        ),
        403 => "Access forbidden (403). The API key may be out of credit.".to_string(),
        429 => "Rate limited. Wait a moment and try again.".to_string(),
        _ if body.is_empty() => format!("API error {}", status),
        _ => format!("API error {}: {}", status, body),
    }
}

pub type Result<T> = std::result::Result<T, CleverbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(code: u16, body: &str) -> CleverbotError {
        CleverbotError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn status_is_transport() {
        let e = status_error(500, "boom");
        assert!(e.is_transport());
        assert!(!e.is_parse());
        assert_eq!(e.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn empty_body_is_parse() {
        let e = CleverbotError::EmptyBody;
        assert!(e.is_parse());
        assert!(!e.is_transport());
        assert_eq!(e.status(), None);
    }

    #[test]
    fn json_error_is_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = CleverbotError::from(json_err);
        assert!(e.is_parse());
    }

    #[test]
    fn unauthorized_message_mentions_key() {
        let msg = status_error(401, "").to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains(API_KEY_ENV));
    }

    #[test]
    fn generic_status_includes_body() {
        let msg = status_error(502, "bad gateway").to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("bad gateway"));
    }

    #[test]
    fn generic_status_without_body() {
        let msg = status_error(500, "").to_string();
        assert!(msg.starts_with("API error 500"));
        assert!(!msg.ends_with(": "));
    }
}
