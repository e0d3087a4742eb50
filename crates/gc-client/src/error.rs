use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the bearer token. The stored token has already
    /// been cleared when this is returned.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Invalid auth response: missing access_token")]
    MissingToken,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Picks the user-facing message out of an error response.
///
/// Order: JSON `detail`, JSON `message`, the raw body, then the status
/// reason. FastAPI validation errors put a list under `detail`; their `msg`
/// fields are joined.
pub fn error_message(body: &str, statusText: &str) -> String {
    let trimmed = body.trim();
    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        for field in ["detail", "message"] {
            if let Some(message) = json.get(field).and_then(message_from_value) {
                return message;
            }
        }
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    statusText.to_string()
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_message() {
        let body = r#"{"detail":"Collection not found","message":"ignored"}"#;
        assert_eq!(error_message(body, "Not Found"), "Collection not found");
    }

    #[test]
    fn falls_back_to_message_then_body_then_status() {
        assert_eq!(error_message(r#"{"message":"Nope"}"#, "Bad Request"), "Nope");
        assert_eq!(error_message("upstream exploded", "Bad Gateway"), "upstream exploded");
        assert_eq!(error_message("", "Service Unavailable"), "Service Unavailable");
        assert_eq!(error_message(r#"{"other":1}"#, "Conflict"), r#"{"other":1}"#);
    }

    #[test]
    fn validation_lists_are_joined() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"msg":"too short"}]}"#;
        assert_eq!(error_message(body, "Unprocessable Entity"), "field required; too short");
    }

    #[test]
    fn display_uses_the_server_message() {
        let err = ApiError::Http {
            status: 400,
            message: "Address required".into(),
        };
        assert_eq!(err.to_string(), "Address required");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }
}
