//! Form state behind the login, registration and new-quiz screens.
//!
//! Views own the raw field values and hand them to the services; they never talk to
//! repositories directly.

pub mod login;
pub mod new_quiz;
pub mod register;

pub use login::LoginView;
pub use new_quiz::NewQuizView;
pub use register::RegisterView;

use crate::errors::ApiErrors;

pub(crate) fn has_errors(errors: Option<&ApiErrors>) -> bool {
    errors.is_some_and(|e| !e.is_empty())
}
