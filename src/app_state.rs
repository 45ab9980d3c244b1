use std::sync::Arc;

use crate::{
    auth::SessionHandle,
    config::Config,
    errors::AppResult,
    http::ApiClient,
    repositories::{HttpAuthRepository, HttpQnaRepository, HttpQuizRepository, HttpTopicRepository},
    services::{QnaEditor, QuizGenerator, RegistrationService, SessionStore, TopicDirectory},
};

/// Everything a front end needs: one session shared by every repository, plus the
/// stateful services behind each screen.
pub struct AppState {
    pub session: SessionStore,
    pub registration: RegistrationService,
    pub topics: TopicDirectory,
    pub quiz: QuizGenerator,
    pub qna: QnaEditor,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let handle = SessionHandle::new();
        let client = ApiClient::new(&config, handle.clone())?;

        let auth_repository = Arc::new(HttpAuthRepository::new(client.clone(), &config));
        let session = SessionStore::new(auth_repository.clone(), handle);
        let registration = RegistrationService::new(auth_repository);

        let topics = TopicDirectory::new(Arc::new(HttpTopicRepository::new(client.clone())));
        let quiz = QuizGenerator::new(Arc::new(HttpQuizRepository::new(client.clone())));
        let qna = QnaEditor::new(Arc::new(HttpQnaRepository::new(client)));

        Ok(Self {
            session,
            registration,
            topics,
            quiz,
            qna,
            config: Arc::new(config),
        })
    }
}
