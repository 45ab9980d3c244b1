pub mod helpers;

use reqwest::{Client, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    auth::SessionHandle,
    config::Config,
    errors::{AppError, AppResult},
    http::helpers::{ensure_success, parse_json},
};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Thin wrapper over `reqwest::Client` that knows the backend's base URL and attaches the
/// bearer token of the shared session to authenticated calls.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionHandle) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("random-quiz-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let request_id = Uuid::new_v4().to_string();
        log::debug!("{} {} [{}]", method, path, request_id);
        let builder = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id.as_str());
        (builder, request_id)
    }

    fn authorized(&self, method: Method, path: &str) -> AppResult<(RequestBuilder, String)> {
        let token = self.session.access_token().ok_or_else(|| {
            AppError::Unauthorized("Log in before calling the API".to_string())
        })?;
        let (builder, request_id) = self.request(method, path);
        Ok((builder.bearer_auth(token.expose_secret()), request_id))
    }

    async fn execute(&self, builder: RequestBuilder, request_id: &str) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            log::error!("Request [{}] failed to send: {}", request_id, e);
            AppError::from(e)
        })?;

        let status = response.status();
        match ensure_success(response).await {
            Ok(response) => {
                log::debug!("Request [{}] completed with {}", request_id, status);
                Ok(response)
            }
            Err(err) => {
                log::warn!("Request [{}] returned {}: {}", request_id, status, err);
                Err(err)
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let (builder, request_id) = self.authorized(Method::GET, path)?;
        let response = self.execute(builder, &request_id).await?;
        parse_json(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, request_id) = self.authorized(method, path)?;
        let response = self.execute(builder.json(body), &request_id).await?;
        parse_json(response).await
    }

    pub async fn send_json_no_content<B>(&self, method: Method, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let (builder, request_id) = self.authorized(method, path)?;
        self.execute(builder.json(body), &request_id).await?;
        Ok(())
    }

    pub async fn send_no_content(&self, method: Method, path: &str) -> AppResult<()> {
        let (builder, request_id) = self.authorized(method, path)?;
        self.execute(builder, &request_id).await?;
        Ok(())
    }

    /// Unauthenticated form-encoded POST, used by the token and registration endpoints.
    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (builder, request_id) = self.request(Method::POST, path);
        let response = self.execute(builder.form(form), &request_id).await?;
        parse_json(response).await
    }
}
