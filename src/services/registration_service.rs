use std::{fmt, sync::Arc};

use secrecy::SecretString;
use validator::Validate;

use crate::{
    errors::{ApiErrors, AppError, AppResult},
    repositories::AuthRepository,
};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful!";

#[derive(Clone, Default, Validate)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(username: &str, password: &str, confirm_password: &str) -> Self {
        RegistrationForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Account registration plus the "register / already registered" screen toggle.
pub struct RegistrationService {
    repository: Arc<dyn AuthRepository>,
    screen_active: bool,
    success_message: Option<String>,
    errors: Option<ApiErrors>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self {
            repository,
            screen_active: true,
            success_message: None,
            errors: None,
        }
    }

    pub fn screen_active(&self) -> bool {
        self.screen_active
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn errors(&self) -> Option<&ApiErrors> {
        self.errors.as_ref()
    }

    pub fn activate_screen(&mut self) {
        self.screen_active = true;
    }

    pub fn deactivate_screen(&mut self) {
        self.screen_active = false;
    }

    /// Registers a new account. A password confirmation mismatch is rejected before any
    /// request is sent.
    pub async fn register(&mut self, form: &RegistrationForm) -> AppResult<()> {
        if let Err(err) = form.validate() {
            log::debug!("Registration form rejected: {}", err);
            self.errors = Some(ApiErrors::for_field("confirmPassword", PASSWORD_MISMATCH));
            return Err(AppError::ValidationError(PASSWORD_MISMATCH.to_string()));
        }

        let password = SecretString::from(form.password.clone());
        match self.repository.register(&form.username, &password).await {
            Ok(user) => {
                log::info!("Registered account {}", user.username);
                self.success_message = Some(REGISTRATION_SUCCEEDED.to_string());
                self.errors = None;
                self.deactivate_screen();
                Ok(())
            }
            Err(err) => {
                log::warn!("Registration of {} failed: {}", form.username, err);
                self.errors = Some(err.display_errors());
                self.success_message = None;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::dto::response::RegisteredUser, repositories::MockAuthRepository};
    use serde_json::json;

    #[tokio::test]
    async fn test_password_mismatch_short_circuits() {
        let mut mock = MockAuthRepository::new();
        mock.expect_register().times(0);

        let mut service = RegistrationService::new(Arc::new(mock));
        let result = service
            .register(&RegistrationForm::new("bob", "secret1", "secret2"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(
            service.errors().unwrap().0,
            json!({"confirmPassword": ["Passwords do not match."]})
        );
        assert!(service.screen_active());
    }

    #[tokio::test]
    async fn test_successful_registration_deactivates_screen() {
        let mut mock = MockAuthRepository::new();
        mock.expect_register()
            .withf(|username, _| username == "bob")
            .times(1)
            .returning(|username, _| {
                Ok(RegisteredUser {
                    username: username.to_string(),
                })
            });

        let mut service = RegistrationService::new(Arc::new(mock));
        service
            .register(&RegistrationForm::new("bob", "secret1", "secret1"))
            .await
            .unwrap();

        assert_eq!(service.success_message(), Some(REGISTRATION_SUCCEEDED));
        assert!(!service.screen_active());
        assert!(service.errors().is_none());
    }

    #[tokio::test]
    async fn test_server_errors_are_kept_and_message_cleared() {
        let mut mock = MockAuthRepository::new();
        mock.expect_register().times(1).returning(|_, _| {
            Err(AppError::Api {
                status: 400,
                errors: ApiErrors(json!({"username": ["A user with that username already exists."]})),
            })
        });

        let mut service = RegistrationService::new(Arc::new(mock));
        assert!(service
            .register(&RegistrationForm::new("bob", "pw", "pw"))
            .await
            .is_err());

        assert_eq!(
            service.errors().unwrap().field("username"),
            vec!["A user with that username already exists.".to_string()]
        );
        assert!(service.success_message().is_none());
        assert!(service.screen_active());
    }

    #[test]
    fn test_form_debug_redacts_passwords() {
        let form = RegistrationForm::new("bob", "hunter22", "hunter22");
        let debug = format!("{:?}", form);

        assert!(debug.contains("bob"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_screen_toggle() {
        let mut service = RegistrationService::new(Arc::new(MockAuthRepository::new()));
        service.deactivate_screen();
        assert!(!service.screen_active());
        service.activate_screen();
        assert!(service.screen_active());
    }
}
