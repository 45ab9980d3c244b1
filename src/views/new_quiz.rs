use crate::{
    errors::{AppError, AppResult},
    models::domain::{GenerateSettings, TopicSelection},
};

#[derive(Clone, Debug)]
pub struct NewQuizView {
    pub topic_control: i64,
    pub question_count: u32,
    pub choice_count: u32,
    pub show_all_alternative_answers: bool,
}

impl Default for NewQuizView {
    fn default() -> Self {
        NewQuizView {
            topic_control: TopicSelection::NoSelection.control_value(),
            question_count: 10,
            choice_count: 4,
            show_all_alternative_answers: false,
        }
    }
}

impl NewQuizView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> TopicSelection {
        TopicSelection::from_control_value(self.topic_control)
    }

    /// Settings for the generator. Fails while the select control sits on one of its
    /// placeholder entries.
    pub fn settings(&self) -> AppResult<GenerateSettings> {
        let topic_id = self
            .selection()
            .topic_id()
            .ok_or_else(|| AppError::BadRequest("Select a topic first".to_string()))?;

        let mut settings = GenerateSettings::new(topic_id, self.question_count, self.choice_count);
        settings.show_all_alternative_answers = self.show_all_alternative_answers;
        Ok(settings)
    }
}
