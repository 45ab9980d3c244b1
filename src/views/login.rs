use secrecy::SecretString;

use crate::{errors::AppResult, services::SessionStore};

#[derive(Clone, Debug, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs in with the typed credentials. The password field is cleared once the
    /// grant succeeds; on failure it is kept so the user can correct it.
    pub async fn submit(&mut self, store: &mut SessionStore) -> AppResult<()> {
        let password = SecretString::from(self.password.clone());
        store.login(self.username.trim(), password).await?;
        self.password.clear();
        Ok(())
    }

    pub async fn refresh(&self, store: &mut SessionStore) -> AppResult<()> {
        store.refresh().await
    }

    pub fn logout(&mut self, store: &mut SessionStore) {
        store.logout();
        self.password.clear();
    }

    pub fn has_errors(&self, store: &SessionStore) -> bool {
        super::has_errors(store.errors())
    }
}
