use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::Grant,
    config::Config,
    errors::AppResult,
    http::ApiClient,
    models::dto::{
        request::RegisterRequest,
        response::{RegisteredUser, TokenResponse},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn request_token(&self, grant: &Grant) -> AppResult<TokenResponse>;
    async fn register(&self, username: &str, password: &SecretString) -> AppResult<RegisteredUser>;
}

pub struct HttpAuthRepository {
    client: ApiClient,
    token_path: String,
    register_path: String,
    client_id: String,
    client_secret: Option<SecretString>,
}

impl HttpAuthRepository {
    pub fn new(client: ApiClient, config: &Config) -> Self {
        Self {
            client,
            token_path: config.token_path.clone(),
            register_path: config.register_path.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn request_token(&self, grant: &Grant) -> AppResult<TokenResponse> {
        let form = grant.to_request(&self.client_id, self.client_secret.as_ref());
        self.client.post_form(&self.token_path, &form).await
    }

    async fn register(&self, username: &str, password: &SecretString) -> AppResult<RegisteredUser> {
        let form = RegisterRequest {
            username,
            password: password.expose_secret(),
        };
        self.client.post_form(&self.register_path, &form).await
    }
}
