#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::{
        domain::{QuizQuestionType, Session},
        dto::response::{
            AttemptResponse, ChoiceResponse, QnaAnswerResponse, QnaQuestionResponse, QnaResponse,
            QuizQuestionResponse, QuizResponse, ScoredChoiceResponse, ScoredQuestionResponse,
            TokenResponse,
        },
        ids::{AnswerId, AttemptId, QuestionId, QuizId, TopicId},
    };

    pub fn token_response(access: &str, expires_in: i64, refresh: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: access.to_string(),
            expires_in,
            refresh_token: refresh.map(str::to_string),
            token_type: Some("Bearer".to_string()),
            scope: Some("read write".to_string()),
        }
    }

    pub fn session(username: &str, access: &str) -> Session {
        Session::from_grant(username, &token_response(access, 3600, Some("refresh")), Utc::now())
            .unwrap()
    }

    /// Quiz 7: two radio questions with choices `a, b` and `c, d`
    pub fn quiz_response() -> QuizResponse {
        QuizResponse {
            id: QuizId::new(7),
            topic: Some("Letters".to_string()),
            questions: vec![
                QuizQuestionResponse {
                    question_text: "First pair".to_string(),
                    question_type: QuizQuestionType::Single,
                    choices: vec![
                        ChoiceResponse::Text("a".to_string()),
                        ChoiceResponse::Text("b".to_string()),
                    ],
                },
                QuizQuestionResponse {
                    question_text: "Second pair".to_string(),
                    question_type: QuizQuestionType::Single,
                    choices: vec![
                        ChoiceResponse::Text("c".to_string()),
                        ChoiceResponse::Text("d".to_string()),
                    ],
                },
            ],
        }
    }

    pub fn attempt_response(grid: &[&[bool]]) -> AttemptResponse {
        let questions = grid.len() as u32;
        AttemptResponse {
            id: AttemptId::new(21),
            score: 100.0 / questions.max(1) as f64,
            no_of_correct_answers: questions.min(1),
            no_of_wrong_answers: questions.saturating_sub(1),
            questions: grid
                .iter()
                .map(|row| ScoredQuestionResponse {
                    choices: row
                        .iter()
                        .map(|&correct| ScoredChoiceResponse { correct })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Topic 4 with two questions; the first has answers 100 and 101, the second none
    pub fn qna_response() -> QnaResponse {
        QnaResponse {
            topic: TopicId::new(4),
            qna: vec![
                QnaQuestionResponse {
                    question_id: QuestionId::new(10),
                    question_text: "Capital of France?".to_string(),
                    answers: vec![
                        QnaAnswerResponse {
                            answer_id: AnswerId::new(100),
                            answer_text: "Paris".to_string(),
                        },
                        QnaAnswerResponse {
                            answer_id: AnswerId::new(101),
                            answer_text: "Lutetia".to_string(),
                        },
                    ],
                },
                QnaQuestionResponse {
                    question_id: QuestionId::new(11),
                    question_text: "Capital of Peru?".to_string(),
                    answers: vec![],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_session_is_authenticated() {
        let session = session("alice", "token");
        assert!(session.is_authenticated());
        assert_eq!(session.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_fixture_quiz_and_attempt_line_up() {
        let quiz = quiz_response();
        let attempt = attempt_response(&[&[true, false], &[false, true]]);

        assert_eq!(quiz.questions.len(), attempt.questions.len());
        assert_eq!(attempt.no_of_correct_answers + attempt.no_of_wrong_answers, 2);
    }
}
