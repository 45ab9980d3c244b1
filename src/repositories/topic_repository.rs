use async_trait::async_trait;
use reqwest::Method;

use crate::{
    errors::AppResult,
    http::ApiClient,
    models::{domain::Topic, dto::request::TopicRequest, ids::TopicId},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Topic>>;
    async fn create(&self, name: &str) -> AppResult<Topic>;
    async fn update(&self, id: TopicId, name: &str) -> AppResult<Topic>;
    async fn delete(&self, id: TopicId) -> AppResult<()>;
}

pub struct HttpTopicRepository {
    client: ApiClient,
}

impl HttpTopicRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TopicRepository for HttpTopicRepository {
    async fn list(&self) -> AppResult<Vec<Topic>> {
        self.client.get_json("/api/topics/").await
    }

    async fn create(&self, name: &str) -> AppResult<Topic> {
        let body = TopicRequest {
            name: name.to_string(),
        };
        self.client.send_json(Method::POST, "/api/topics/", &body).await
    }

    async fn update(&self, id: TopicId, name: &str) -> AppResult<Topic> {
        let body = TopicRequest {
            name: name.to_string(),
        };
        self.client
            .send_json(Method::PUT, &format!("/api/topics/{}/", id), &body)
            .await
    }

    async fn delete(&self, id: TopicId) -> AppResult<()> {
        self.client
            .send_no_content(Method::DELETE, &format!("/api/topics/{}/", id))
            .await
    }
}
