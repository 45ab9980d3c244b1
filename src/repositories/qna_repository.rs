use async_trait::async_trait;
use reqwest::Method;

use crate::{
    errors::AppResult,
    http::ApiClient,
    models::{
        dto::{
            request::{CreateQnaRequest, DeleteAnswerRequest, DeleteQuestionRequest, TextUpdateRequest},
            response::{CreateQnaResponse, QnaResponse},
        },
        ids::{AnswerId, QuestionId, TopicId},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QnaRepository: Send + Sync {
    async fn fetch_tree(&self, topic_id: TopicId) -> AppResult<QnaResponse>;
    async fn create(&self, request: &CreateQnaRequest) -> AppResult<CreateQnaResponse>;
    async fn update_question(&self, id: QuestionId, request: &TextUpdateRequest) -> AppResult<()>;
    async fn delete_question(&self, id: QuestionId, topic_id: TopicId) -> AppResult<()>;
    async fn update_answer(&self, id: AnswerId, request: &TextUpdateRequest) -> AppResult<()>;
    async fn delete_answer(&self, id: AnswerId, question_id: QuestionId) -> AppResult<()>;
}

pub struct HttpQnaRepository {
    client: ApiClient,
}

impl HttpQnaRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QnaRepository for HttpQnaRepository {
    async fn fetch_tree(&self, topic_id: TopicId) -> AppResult<QnaResponse> {
        self.client.get_json(&format!("/api/qna/{}/", topic_id)).await
    }

    async fn create(&self, request: &CreateQnaRequest) -> AppResult<CreateQnaResponse> {
        self.client.send_json(Method::POST, "/api/qna/", request).await
    }

    async fn update_question(&self, id: QuestionId, request: &TextUpdateRequest) -> AppResult<()> {
        self.client
            .send_json_no_content(Method::PUT, &format!("/api/questions/{}/", id), request)
            .await
    }

    async fn delete_question(&self, id: QuestionId, topic_id: TopicId) -> AppResult<()> {
        let body = DeleteQuestionRequest { topic_id };
        self.client
            .send_json_no_content(Method::DELETE, &format!("/api/questions/{}/", id), &body)
            .await
    }

    async fn update_answer(&self, id: AnswerId, request: &TextUpdateRequest) -> AppResult<()> {
        self.client
            .send_json_no_content(Method::PUT, &format!("/api/answers/{}/", id), request)
            .await
    }

    async fn delete_answer(&self, id: AnswerId, question_id: QuestionId) -> AppResult<()> {
        let body = DeleteAnswerRequest { question_id };
        self.client
            .send_json_no_content(Method::DELETE, &format!("/api/answers/{}/", id), &body)
            .await
    }
}
