use secrecy::{ExposeSecret, SecretString};

use crate::models::dto::request::TokenRequest;

#[derive(Clone, Debug)]
pub enum Grant {
    Password {
        username: String,
        password: SecretString,
    },
    RefreshToken {
        refresh_token: SecretString,
    },
}

impl Grant {
    pub fn password(username: &str, password: SecretString) -> Self {
        Grant::Password {
            username: username.to_string(),
            password,
        }
    }

    pub fn refresh(refresh_token: SecretString) -> Self {
        Grant::RefreshToken { refresh_token }
    }

    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::RefreshToken { .. } => "refresh_token",
        }
    }

    pub fn to_request<'a>(
        &'a self,
        client_id: &'a str,
        client_secret: Option<&'a SecretString>,
    ) -> TokenRequest<'a> {
        let client_secret = client_secret.map(|s| s.expose_secret());

        match self {
            Grant::Password { username, password } => TokenRequest {
                grant_type: self.grant_type(),
                username: Some(username.as_str()),
                password: Some(password.expose_secret()),
                refresh_token: None,
                client_id,
                client_secret,
            },
            Grant::RefreshToken { refresh_token } => TokenRequest {
                grant_type: self.grant_type(),
                username: None,
                password: None,
                refresh_token: Some(refresh_token.expose_secret()),
                client_id,
                client_secret,
            },
        }
    }
}
