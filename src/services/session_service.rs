use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::{fingerprint, Grant, SessionHandle},
    errors::{ApiErrors, AppError, AppResult},
    models::domain::Session,
    repositories::AuthRepository,
};

/// Holds the signed-in user's tokens and drives login, refresh and logout.
pub struct SessionStore {
    repository: Arc<dyn AuthRepository>,
    session: SessionHandle,
    errors: Option<ApiErrors>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn AuthRepository>, session: SessionHandle) -> Self {
        Self {
            repository,
            session,
            errors: None,
        }
    }

    pub fn session(&self) -> Session {
        self.session.snapshot()
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.session
    }

    pub fn errors(&self) -> Option<&ApiErrors> {
        self.errors.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.snapshot().is_authenticated()
    }

    /// Password grant. On failure the previous session is left as it was.
    pub async fn login(&mut self, username: &str, password: SecretString) -> AppResult<()> {
        let grant = Grant::password(username, password);
        let result = self.repository.request_token(&grant).await;
        let response = self.record(result)?;

        let session = self.record(Session::from_grant(username, &response, Utc::now()))?;
        log::info!(
            "Logged in as {} (token {}, expires {:?})",
            username,
            fingerprint(&response.access_token),
            session.expires_at
        );
        self.session.replace(session);
        self.errors = None;
        Ok(())
    }

    /// Refresh grant using the stored refresh token. Never scheduled automatically.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let refresh_token = self.session.refresh_token().ok_or_else(|| {
            AppError::Unauthorized("No refresh token; log in first".to_string())
        })?;
        log::debug!("Refreshing token {}", fingerprint(refresh_token.expose_secret()));

        let grant = Grant::refresh(refresh_token);
        let result = self.repository.request_token(&grant).await;
        let response = self.record(result)?;

        let now = Utc::now();
        let mut session = self.session.snapshot();
        self.record(session.apply_refresh(&response, now))?;
        log::info!(
            "Refreshed session (token {}, expires {:?})",
            fingerprint(&response.access_token),
            session.expires_at
        );
        self.session.replace(session);
        self.errors = None;
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.session.snapshot().username {
            log::info!("Logging out {}", username);
        }
        self.session.clear();
        self.errors = None;
    }

    fn record<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            log::warn!("Session request failed: {}", err);
            self.errors = Some(err.display_errors());
        }
        result
    }
}
