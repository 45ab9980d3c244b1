pub mod qna_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod registration_service;
pub mod session_service;
pub mod topic_service;

pub use qna_service::QnaEditor;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizGenerator;
pub use registration_service::{RegistrationForm, RegistrationService};
pub use session_service::SessionStore;
pub use topic_service::TopicDirectory;
