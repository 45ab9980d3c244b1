use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz_attempt::QuizScore,
            quiz_question::{Choice, QuizQuestion},
        },
        dto::{request::GenerateQuizRequest, response::QuizResponse},
        ids::{AttemptId, QuizId, TopicId},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateSettings {
    pub topic_id: TopicId,
    pub question_count: u32,
    pub choice_count: u32,
    pub show_all_alternative_answers: bool,
}

impl GenerateSettings {
    pub fn new(topic_id: TopicId, question_count: u32, choice_count: u32) -> Self {
        GenerateSettings {
            topic_id,
            question_count,
            choice_count,
            show_all_alternative_answers: false,
        }
    }

    pub fn to_request(&self) -> GenerateQuizRequest {
        GenerateQuizRequest {
            no_of_questions: self.question_count,
            no_of_choices: self.choice_count,
            show_all_alternative_answers: self.show_all_alternative_answers,
        }
    }
}

/// A generated quiz being answered. Read-only once `score` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Quiz {
    pub id: QuizId,
    pub topic: Option<String>,
    pub questions: Vec<QuizQuestion>,
    pub score: Option<QuizScore>,
}

impl Quiz {
    pub fn from_response(response: QuizResponse) -> Self {
        let questions = response
            .questions
            .into_iter()
            .map(|q| {
                let choices = q
                    .choices
                    .into_iter()
                    .map(|c| Choice::new(&c.into_text()))
                    .collect();
                QuizQuestion::new(&q.question_text, q.question_type, choices)
            })
            .collect();

        Quiz {
            id: response.id,
            topic: response.topic,
            questions,
            score: None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    pub fn attempt_id(&self) -> Option<AttemptId> {
        self.score.as_ref().map(|s| s.attempt_id)
    }

    pub fn select(&mut self, question: usize, choice: usize) -> AppResult<()> {
        if self.is_scored() {
            return Err(AppError::BadRequest(
                "Quiz has already been scored".to_string(),
            ));
        }

        let count = self.questions.len();
        self.questions
            .get_mut(question)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Question {} does not exist (quiz has {} questions)",
                    question, count
                ))
            })?
            .select(choice)
    }

    /// Selected choice texts per question, in question order. Unanswered questions
    /// contribute an empty list so positions line up with the server.
    pub fn selected_answers(&self) -> Vec<Vec<String>> {
        self.questions.iter().map(QuizQuestion::selected_texts).collect()
    }
}
