use serde::Serialize;

use crate::models::ids::{QuestionId, TopicId};

#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<&'a str>,
    pub client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateQuizRequest {
    pub no_of_questions: u32,
    pub no_of_choices: u32,
    pub show_all_alternative_answers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptQuizRequest {
    pub answers: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateQnaRequest {
    pub topic: TopicId,
    pub question: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextUpdateRequest {
    pub topic: TopicId,
    pub text: String,
}

/// Questions can belong to several topics; the body tells the server which link to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteQuestionRequest {
    pub topic_id: TopicId,
}

/// Answers can be shared between questions; the body tells the server which link to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAnswerRequest {
    pub question_id: QuestionId,
}
