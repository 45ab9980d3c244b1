use chrono::{DateTime, Utc};

use crate::models::{dto::response::AttemptResponse, ids::AttemptId};

#[derive(Clone, Debug, PartialEq)]
pub struct QuizScore {
    pub attempt_id: AttemptId,
    pub score: f64,
    pub correct: u32,
    pub wrong: u32,
    pub submitted_at: DateTime<Utc>,
}

impl QuizScore {
    pub fn from_response(response: &AttemptResponse, submitted_at: DateTime<Utc>) -> Self {
        QuizScore {
            attempt_id: response.id,
            score: response.score,
            correct: response.no_of_correct_answers,
            wrong: response.no_of_wrong_answers,
            submitted_at,
        }
    }

    pub fn total_answered(&self) -> u32 {
        self.correct + self.wrong
    }
}
