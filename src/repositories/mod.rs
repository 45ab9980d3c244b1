pub mod auth_repository;
pub mod qna_repository;
pub mod quiz_repository;
pub mod topic_repository;

pub use auth_repository::{AuthRepository, HttpAuthRepository};
pub use qna_repository::{HttpQnaRepository, QnaRepository};
pub use quiz_repository::{HttpQuizRepository, QuizRepository};
pub use topic_repository::{HttpTopicRepository, TopicRepository};

#[cfg(test)]
pub use auth_repository::MockAuthRepository;
#[cfg(test)]
pub use qna_repository::MockQnaRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
