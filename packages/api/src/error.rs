//! Error types for backend calls and client-side validation.

use std::time::Duration;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach the server: {0}")]
    Network(String),
    #[error("the server did not answer within {} s", .0.as_secs())]
    Timeout(Duration),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response from the server: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("you are not signed in")]
    Unauthenticated,
    #[error("invalid upload: {0}")]
    Multipart(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
            || matches!(self, ApiError::Status { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Form input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("invalid date or time: {0}")]
    InvalidDateTime(String),
    #[error("{0} is not an image")]
    NotAnImage(String),
}

/// Human-readable message for a non-2xx response.
///
/// JSON bodies carrying `message` (string or list of strings) or `error` win;
/// otherwise the raw text, or the status line when the body is empty.
pub(crate) fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("message") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(serde_json::Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                if !parts.is_empty() {
                    return parts.join(", ");
                }
            }
            _ => {}
        }
        if let Some(s) = value.get("error").and_then(|v| v.as_str()) {
            return s.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("error")
        )
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_message_prefers_json_message() {
        let body = r#"{"statusCode":400,"message":"Email already registered"}"#;
        assert_eq!(
            status_message(StatusCode::BAD_REQUEST, body),
            "Email already registered"
        );

        let body = r#"{"message":["name should not be empty","email must be an email"]}"#;
        assert_eq!(
            status_message(StatusCode::BAD_REQUEST, body),
            "name should not be empty, email must be an email"
        );

        let body = r#"{"error":"Unauthorized"}"#;
        assert_eq!(status_message(StatusCode::UNAUTHORIZED, body), "Unauthorized");
    }

    #[test]
    fn test_status_message_falls_back_to_text() {
        assert_eq!(
            status_message(StatusCode::BAD_GATEWAY, "  upstream down \n"),
            "upstream down"
        );
        assert_eq!(
            status_message(StatusCode::NOT_FOUND, ""),
            "404 Not Found"
        );
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::Unauthenticated.is_unauthorized());
        assert!(ApiError::Status {
            status: 401,
            message: "expired".into()
        }
        .is_unauthorized());
        assert!(!ApiError::Timeout(Duration::from_secs(30)).is_unauthorized());
    }
}
