use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::TokenResponse,
};

/// Authentication state of the signed-in user. Every field is absent while logged out.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub username: Option<String>,
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_in_seconds: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Builds a session from a token grant received at `issued_at`.
    pub fn from_grant(
        username: &str,
        grant: &TokenResponse,
        issued_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let expires_at = expiry(issued_at, grant.expires_in)?;

        Ok(Self {
            username: Some(username.to_string()),
            access_token: Some(SecretString::from(grant.access_token.clone())),
            refresh_token: grant.refresh_token.clone().map(SecretString::from),
            issued_at: Some(issued_at),
            expires_in_seconds: Some(grant.expires_in),
            expires_at: Some(expires_at),
        })
    }

    /// Applies a refresh grant in place. The username is kept, and so is the old
    /// refresh token when the server does not rotate it.
    pub fn apply_refresh(&mut self, grant: &TokenResponse, issued_at: DateTime<Utc>) -> AppResult<()> {
        let expires_at = expiry(issued_at, grant.expires_in)?;

        self.access_token = Some(SecretString::from(grant.access_token.clone()));
        if let Some(refresh_token) = &grant.refresh_token {
            self.refresh_token = Some(SecretString::from(refresh_token.clone()));
        }
        self.issued_at = Some(issued_at);
        self.expires_in_seconds = Some(grant.expires_in);
        self.expires_at = Some(expires_at);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(true)
    }

    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_seconds().max(0))
    }
}

fn expiry(issued_at: DateTime<Utc>, expires_in: i64) -> AppResult<DateTime<Utc>> {
    if expires_in < 0 {
        return Err(AppError::InternalError(format!(
            "Token endpoint returned a negative expires_in ({})",
            expires_in
        )));
    }

    Duration::try_seconds(expires_in)
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::InternalError(format!("expires_in {} is out of range", expires_in))
        })
}
