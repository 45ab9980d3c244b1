use std::env;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub token_path: String,
    pub register_path: String,
    pub client_id: String,
    pub client_secret: Option<SecretString>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("QUIZ_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
            token_path: env::var("QUIZ_TOKEN_PATH").unwrap_or_else(|_| "/o/token/".to_string()),
            register_path: env::var("QUIZ_REGISTER_PATH")
                .unwrap_or_else(|_| "/register/".to_string()),
            client_id: env::var("QUIZ_CLIENT_ID").unwrap_or_default(),
            client_secret: env::var("QUIZ_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(SecretString::from),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::ValidationError(format!(
                "QUIZ_API_URL must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        if self.client_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "QUIZ_CLIENT_ID is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            token_path: "/o/token/".to_string(),
            register_path: "/register/".to_string(),
            client_id: "test-client-id".to_string(),
            client_secret: None,
        }
    }
}
