use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error payload returned by the backend, kept exactly as the server sent it so a
/// view can render it next to the offending field or item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiErrors(pub Value);

impl ApiErrors {
    /// Wraps a raw response body. Bodies that are not JSON are kept as a JSON string.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ApiErrors(value),
            Err(_) => ApiErrors(Value::String(body.to_string())),
        }
    }

    /// Builds the `{field: [message]}` shape the backend uses for validation errors.
    pub fn for_field(field: &str, message: &str) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(
            field.to_string(),
            Value::Array(vec![Value::String(message.to_string())]),
        );
        ApiErrors(Value::Object(map))
    }

    pub fn field(&self, field: &str) -> Vec<String> {
        match self.0.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(other) => vec![other.to_string()],
            None => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("API error ({status}): {errors}")]
    Api { status: u16, errors: ApiErrors },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Api { .. } => "API_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn display_errors(&self) -> ApiErrors {
        match self {
            AppError::Api { errors, .. } => errors.clone(),
            other => ApiErrors(Value::String(other.to_string())),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InternalError(format!("Malformed response body: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::ValidationError("x".into()).error_code(),
            "VALIDATION_ERROR"
        );
        let api = AppError::Api {
            status: 400,
            errors: ApiErrors(json!({})),
        };
        assert_eq!(api.error_code(), "API_ERROR");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("topic 3".into());
        assert_eq!(err.to_string(), "Not found: topic 3");
    }

    #[test]
    fn test_api_errors_keep_json_body_verbatim() {
        let errors = ApiErrors::from_body(r#"{"error":"invalid_grant","error_description":"Invalid credentials given."}"#);
        assert_eq!(
            errors.0,
            json!({"error": "invalid_grant", "error_description": "Invalid credentials given."})
        );
        assert_eq!(errors.field("error"), vec!["invalid_grant".to_string()]);
    }

    #[test]
    fn test_api_errors_wrap_plain_text() {
        let errors = ApiErrors::from_body("Bad Gateway");
        assert_eq!(errors.0, Value::String("Bad Gateway".to_string()));
        assert_eq!(errors.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_for_field_shape() {
        let errors = ApiErrors::for_field("confirmPassword", "Passwords do not match.");
        assert_eq!(errors.0, json!({"confirmPassword": ["Passwords do not match."]}));
        assert_eq!(errors.field("confirmPassword").len(), 1);
        assert!(errors.field("username").is_empty());
    }

    #[test]
    fn test_display_errors_for_local_failure() {
        let err = AppError::Unauthorized("not logged in".into());
        assert_eq!(
            err.display_errors().0,
            Value::String("Unauthorized: not logged in".to_string())
        );
    }
}
