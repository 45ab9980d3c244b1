use crate::models::{
    domain::Quiz,
    dto::{request::AttemptQuizRequest, response::AttemptResponse},
};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Builds the attempt payload: one list of selected choice texts per question, in the
    /// order the questions were served. Unanswered questions send an empty list.
    pub fn collect_answers(quiz: &Quiz) -> AttemptQuizRequest {
        AttemptQuizRequest {
            answers: quiz.selected_answers(),
        }
    }

    /// Copies the server's correctness flags onto the quiz by position: question `i`,
    /// choice `j` takes `response.questions[i].choices[j].correct`. Choice texts are never
    /// compared, and positions the server did not report stay `None`.
    pub fn back_fill(quiz: &mut Quiz, response: &AttemptResponse) {
        for (i, question) in quiz.questions.iter_mut().enumerate() {
            let scored = response.questions.get(i);
            for (j, choice) in question.choices.iter_mut().enumerate() {
                choice.correct = scored.and_then(|q| q.choices.get(j)).map(|c| c.correct);
            }
        }
    }
}
