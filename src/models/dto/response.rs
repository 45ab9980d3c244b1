use std::fmt;

use serde::Deserialize;

use crate::models::domain::quiz_question::QuizQuestionType;
use crate::models::ids::{AnswerId, AttemptId, QuestionId, QuizId, TopicId};

#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizResponse {
    pub id: QuizId,
    #[serde(default)]
    pub topic: Option<String>,
    pub questions: Vec<QuizQuestionResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizQuestionResponse {
    #[serde(alias = "question")]
    pub question_text: String,
    #[serde(alias = "type")]
    pub question_type: QuizQuestionType,
    pub choices: Vec<ChoiceResponse>,
}

/// The generator serves choices either as bare strings or as objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChoiceResponse {
    Text(String),
    Object {
        #[serde(alias = "text")]
        choice_text: String,
    },
}

impl ChoiceResponse {
    pub fn into_text(self) -> String {
        match self {
            ChoiceResponse::Text(text) => text,
            ChoiceResponse::Object { choice_text } => choice_text,
        }
    }
}

/// Scoring result of `PUT /api/attempt_quiz/:quizId/`. `questions[i].choices[j]` lines up
/// with question `i`, choice `j` of the submitted quiz.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttemptResponse {
    pub id: AttemptId,
    pub score: f64,
    pub no_of_correct_answers: u32,
    pub no_of_wrong_answers: u32,
    pub questions: Vec<ScoredQuestionResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredQuestionResponse {
    pub choices: Vec<ScoredChoiceResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredChoiceResponse {
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QnaResponse {
    pub topic: TopicId,
    pub qna: Vec<QnaQuestionResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QnaQuestionResponse {
    pub question_id: QuestionId,
    pub question_text: String,
    #[serde(default)]
    pub answers: Vec<QnaAnswerResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QnaAnswerResponse {
    pub answer_id: AnswerId,
    pub answer_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateQnaResponse {
    pub topic: TopicId,
    pub question: QuestionId,
    #[serde(default)]
    pub answers: Vec<AnswerId>,
}
