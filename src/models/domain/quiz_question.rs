use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum QuizQuestionType {
    #[serde(rename = "radio", alias = "single")]
    Single,
    #[serde(rename = "checkbox", alias = "multi")]
    Multi,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
    pub selected: bool,
    pub correct: Option<bool>,
}

impl Choice {
    pub fn new(text: &str) -> Self {
        Choice {
            text: text.to_string(),
            selected: false,
            correct: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestion {
    pub text: String,
    pub question_type: QuizQuestionType,
    pub choices: Vec<Choice>,
}

impl QuizQuestion {
    pub fn new(text: &str, question_type: QuizQuestionType, choices: Vec<Choice>) -> Self {
        QuizQuestion {
            text: text.to_string(),
            question_type,
            choices,
        }
    }

    /// Applies a click on choice `index`.
    ///
    /// Radio questions clear every sibling before marking the choice, so exactly one stays
    /// selected. Checkbox questions flip only the clicked choice.
    pub fn select(&mut self, index: usize) -> AppResult<()> {
        if index >= self.choices.len() {
            return Err(AppError::BadRequest(format!(
                "Choice {} does not exist (question has {} choices)",
                index,
                self.choices.len()
            )));
        }

        match self.question_type {
            QuizQuestionType::Single => {
                for choice in self.choices.iter_mut() {
                    choice.selected = false;
                }
                self.choices[index].selected = true;
            }
            QuizQuestionType::Multi => {
                let choice = &mut self.choices[index];
                choice.selected = !choice.selected;
            }
        }
        Ok(())
    }

    pub fn selected_texts(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.text.clone())
            .collect()
    }
}
