use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{ApiErrors, AppError, AppResult};

/// Turns a non-2xx response into `AppError::Api`, carrying the body verbatim.
pub async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read response body".to_string());
    Err(api_error(status, &body))
}

pub fn api_error(status: StatusCode, body: &str) -> AppError {
    AppError::Api {
        status: status.as_u16(),
        errors: ApiErrors::from_body(body),
    }
}

pub async fn parse_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        AppError::InternalError(format!("Unexpected response body ({}): {}", e, body))
    })
}
