use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{ApiErrors, AppError, AppResult},
    models::{
        domain::{GenerateSettings, Quiz, QuizScore},
        ids::QuizId,
    },
    repositories::QuizRepository,
    services::quiz_attempt_service::QuizAttemptService,
};

/// Generates quizzes, tracks the user's selections and submits them for scoring.
pub struct QuizGenerator {
    repository: Arc<dyn QuizRepository>,
    quiz: Option<Quiz>,
    errors: Option<ApiErrors>,
}

impl QuizGenerator {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self {
            repository,
            quiz: None,
            errors: None,
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn score(&self) -> Option<&QuizScore> {
        self.quiz.as_ref().and_then(|q| q.score.as_ref())
    }

    pub fn errors(&self) -> Option<&ApiErrors> {
        self.errors.as_ref()
    }

    pub async fn generate(&mut self, settings: &GenerateSettings) -> AppResult<&Quiz> {
        if settings.topic_id.is_sentinel() {
            return Err(AppError::BadRequest("Select a topic first".to_string()));
        }

        let result = self
            .repository
            .generate(settings.topic_id, &settings.to_request())
            .await;
        let response = self.record(result)?;

        let quiz = Quiz::from_response(response);
        log::info!(
            "Generated quiz {} with {} questions for topic {}",
            quiz.id,
            quiz.questions.len(),
            settings.topic_id
        );
        self.errors = None;
        Ok(self.quiz.insert(quiz))
    }

    pub fn select(&mut self, question: usize, choice: usize) -> AppResult<()> {
        self.quiz
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No quiz has been generated".to_string()))?
            .select(question, choice)
    }

    /// Submits the selections and merges the returned correctness flags into the quiz.
    pub async fn submit(&mut self) -> AppResult<&QuizScore> {
        let quiz = self
            .quiz
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No quiz has been generated".to_string()))?;
        if quiz.is_scored() {
            return Err(AppError::BadRequest(
                "Quiz has already been scored".to_string(),
            ));
        }

        let quiz_id = quiz.id;
        let request = QuizAttemptService::collect_answers(quiz);
        let result = self.repository.attempt(quiz_id, &request).await;
        let response = self.record(result)?;

        let quiz = self
            .quiz
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No quiz has been generated".to_string()))?;
        QuizAttemptService::back_fill(quiz, &response);
        let score = quiz.score.insert(QuizScore::from_response(&response, Utc::now()));
        log::info!(
            "Quiz {} scored {} ({} of {} correct)",
            quiz_id,
            score.score,
            score.correct,
            score.total_answered()
        );
        self.errors = None;
        Ok(score)
    }

    pub async fn retry(&mut self, quiz_id: QuizId) -> AppResult<&Quiz> {
        let result = self.repository.fetch(quiz_id).await;
        let response = self.record(result)?;

        log::info!("Retrying quiz {}", quiz_id);
        self.errors = None;
        Ok(self.quiz.insert(Quiz::from_response(response)))
    }

    fn record<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            log::warn!("Quiz request failed: {}", err);
            self.errors = Some(err.display_errors());
        }
        result
    }
}
