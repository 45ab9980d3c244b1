use crate::{
    errors::AppResult,
    services::{RegistrationForm, RegistrationService},
};

#[derive(Clone, Debug, Default)]
pub struct RegisterView {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> RegistrationForm {
        RegistrationForm::new(&self.username, &self.password, &self.confirm_password)
    }

    pub async fn submit(&mut self, service: &mut RegistrationService) -> AppResult<()> {
        service.register(&self.form()).await?;
        self.clear();
        Ok(())
    }

    pub fn reactivate(&mut self, service: &mut RegistrationService) {
        self.clear();
        service.activate_screen();
    }

    pub fn has_errors(&self, service: &RegistrationService) -> bool {
        super::has_errors(service.errors())
    }

    fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.confirm_password.clear();
    }
}
