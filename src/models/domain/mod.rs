pub mod qna;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod session;
pub mod topic;
pub use qna::{QnaAnswer, QnaQuestion, QnaTree, StagedQuestion};
pub use quiz::{GenerateSettings, Quiz};
pub use quiz_attempt::QuizScore;
pub use quiz_question::{Choice, QuizQuestion, QuizQuestionType};
pub use session::Session;
pub use topic::{Topic, TopicMode, TopicSelection};
