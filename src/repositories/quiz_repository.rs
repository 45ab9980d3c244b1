use async_trait::async_trait;
use reqwest::Method;

use crate::{
    errors::AppResult,
    http::ApiClient,
    models::{
        dto::{
            request::{AttemptQuizRequest, GenerateQuizRequest},
            response::{AttemptResponse, QuizResponse},
        },
        ids::{QuizId, TopicId},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn generate(&self, topic_id: TopicId, request: &GenerateQuizRequest) -> AppResult<QuizResponse>;
    async fn fetch(&self, quiz_id: QuizId) -> AppResult<QuizResponse>;
    async fn attempt(&self, quiz_id: QuizId, request: &AttemptQuizRequest) -> AppResult<AttemptResponse>;
}

pub struct HttpQuizRepository {
    client: ApiClient,
}

impl HttpQuizRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuizRepository for HttpQuizRepository {
    async fn generate(&self, topic_id: TopicId, request: &GenerateQuizRequest) -> AppResult<QuizResponse> {
        self.client
            .send_json(Method::PUT, &format!("/api/generate_quiz/{}/", topic_id), request)
            .await
    }

    async fn fetch(&self, quiz_id: QuizId) -> AppResult<QuizResponse> {
        self.client
            .get_json(&format!("/api/generate_quiz/{}/", quiz_id))
            .await
    }

    async fn attempt(&self, quiz_id: QuizId, request: &AttemptQuizRequest) -> AppResult<AttemptResponse> {
        self.client
            .send_json(Method::PUT, &format!("/api/attempt_quiz/{}/", quiz_id), request)
            .await
    }
}
