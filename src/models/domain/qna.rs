use crate::{
    errors::{ApiErrors, AppError, AppResult},
    models::{
        dto::{
            request::CreateQnaRequest,
            response::{CreateQnaResponse, QnaResponse},
        },
        ids::{AnswerId, EntryKey, KeyAllocator, QuestionId, TopicId},
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct QnaAnswer {
    pub key: EntryKey,
    pub id: Option<AnswerId>,
    pub text: String,
    pub editing: bool,
    pub errors: Option<ApiErrors>,
}

impl QnaAnswer {
    fn persisted(key: EntryKey, id: AnswerId, text: String) -> Self {
        QnaAnswer {
            key,
            id: Some(id),
            text,
            editing: false,
            errors: None,
        }
    }

    fn staged(key: EntryKey) -> Self {
        QnaAnswer {
            key,
            id: None,
            text: String::new(),
            editing: true,
            errors: None,
        }
    }

    pub fn is_staged(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QnaQuestion {
    pub key: EntryKey,
    pub id: QuestionId,
    pub text: String,
    pub editing: bool,
    pub errors: Option<ApiErrors>,
    pub answers: Vec<QnaAnswer>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StagedQuestion {
    pub key: EntryKey,
    pub text: String,
    pub answers: Vec<QnaAnswer>,
    pub errors: Option<ApiErrors>,
}

impl StagedQuestion {
    pub fn to_request(&self, topic: TopicId) -> CreateQnaRequest {
        CreateQnaRequest {
            topic,
            question: self.text.clone(),
            answers: self
                .answers
                .iter()
                .filter(|a| !a.text.trim().is_empty())
                .map(|a| a.text.clone())
                .collect(),
        }
    }
}

/// Editable question/answer tree for one topic.
///
/// Entries are addressed by `EntryKey` rather than position so that removing one entry
/// never retargets an operation aimed at another.
#[derive(Clone, Debug)]
pub struct QnaTree {
    pub topic_id: TopicId,
    pub questions: Vec<QnaQuestion>,
    pub staged: Vec<StagedQuestion>,
    keys: KeyAllocator,
}

impl QnaTree {
    pub fn new(topic_id: TopicId) -> Self {
        QnaTree {
            topic_id,
            questions: Vec::new(),
            staged: Vec::new(),
            keys: KeyAllocator::default(),
        }
    }

    pub fn from_response(response: QnaResponse) -> Self {
        let mut tree = QnaTree::new(response.topic);

        for question in response.qna {
            let key = tree.keys.allocate();
            let answers = question
                .answers
                .into_iter()
                .map(|a| QnaAnswer::persisted(tree.keys.allocate(), a.answer_id, a.answer_text))
                .collect();

            tree.questions.push(QnaQuestion {
                key,
                id: question.question_id,
                text: question.question_text,
                editing: false,
                errors: None,
                answers,
            });
        }

        tree
    }

    pub fn question(&self, key: EntryKey) -> AppResult<&QnaQuestion> {
        self.questions
            .iter()
            .find(|q| q.key == key)
            .ok_or_else(|| missing("question", key))
    }

    pub fn question_mut(&mut self, key: EntryKey) -> AppResult<&mut QnaQuestion> {
        self.questions
            .iter_mut()
            .find(|q| q.key == key)
            .ok_or_else(|| missing("question", key))
    }

    pub fn answer(&self, question: EntryKey, answer: EntryKey) -> AppResult<&QnaAnswer> {
        self.question(question)?
            .answers
            .iter()
            .find(|a| a.key == answer)
            .ok_or_else(|| missing("answer", answer))
    }

    pub fn answer_mut(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<&mut QnaAnswer> {
        self.question_mut(question)?
            .answers
            .iter_mut()
            .find(|a| a.key == answer)
            .ok_or_else(|| missing("answer", answer))
    }

    pub fn remove_question(&mut self, key: EntryKey) -> AppResult<QnaQuestion> {
        let index = self
            .questions
            .iter()
            .position(|q| q.key == key)
            .ok_or_else(|| missing("question", key))?;
        Ok(self.questions.remove(index))
    }

    pub fn remove_answer(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<QnaAnswer> {
        let answers = &mut self.question_mut(question)?.answers;
        let index = answers
            .iter()
            .position(|a| a.key == answer)
            .ok_or_else(|| missing("answer", answer))?;
        Ok(answers.remove(index))
    }

    pub fn push_answer(&mut self, question: EntryKey) -> AppResult<EntryKey> {
        let key = self.keys.allocate();
        self.question_mut(question)?.answers.push(QnaAnswer::staged(key));
        Ok(key)
    }

    pub fn stage_question(&mut self) -> EntryKey {
        let key = self.keys.allocate();
        self.staged.push(StagedQuestion {
            key,
            text: String::new(),
            answers: Vec::new(),
            errors: None,
        });
        key
    }

    pub fn staged(&self, key: EntryKey) -> AppResult<&StagedQuestion> {
        self.staged
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| missing("staged question", key))
    }

    pub fn staged_mut(&mut self, key: EntryKey) -> AppResult<&mut StagedQuestion> {
        self.staged
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| missing("staged question", key))
    }

    pub fn stage_answer(&mut self, staged: EntryKey) -> AppResult<EntryKey> {
        let key = self.keys.allocate();
        self.staged_mut(staged)?.answers.push(QnaAnswer::staged(key));
        Ok(key)
    }

    pub fn staged_answer_mut(&mut self, staged: EntryKey, answer: EntryKey) -> AppResult<&mut QnaAnswer> {
        self.staged_mut(staged)?
            .answers
            .iter_mut()
            .find(|a| a.key == answer)
            .ok_or_else(|| missing("staged answer", answer))
    }

    pub fn remove_staged(&mut self, key: EntryKey) -> AppResult<StagedQuestion> {
        let index = self
            .staged
            .iter()
            .position(|s| s.key == key)
            .ok_or_else(|| missing("staged question", key))?;
        Ok(self.staged.remove(index))
    }

    pub fn remove_staged_answer(&mut self, staged: EntryKey, answer: EntryKey) -> AppResult<QnaAnswer> {
        let answers = &mut self.staged_mut(staged)?.answers;
        let index = answers
            .iter()
            .position(|a| a.key == answer)
            .ok_or_else(|| missing("staged answer", answer))?;
        Ok(answers.remove(index))
    }

    /// Moves a staged question into the persisted list. Answer ids are assigned only when
    /// the server returned one per non-blank answer; otherwise the answers stay staged.
    pub fn promote(&mut self, key: EntryKey, created: &CreateQnaResponse) -> AppResult<EntryKey> {
        let staged = self.remove_staged(key)?;

        let typed: Vec<QnaAnswer> = staged
            .answers
            .into_iter()
            .filter(|a| !a.text.trim().is_empty())
            .collect();
        let ids_line_up = typed.len() == created.answers.len();

        let answers = typed
            .into_iter()
            .enumerate()
            .map(|(i, a)| {
                let id = if ids_line_up { created.answers.get(i).copied() } else { None };
                QnaAnswer {
                    key: a.key,
                    id,
                    text: a.text,
                    editing: false,
                    errors: None,
                }
            })
            .collect();

        self.questions.push(QnaQuestion {
            key: staged.key,
            id: created.question,
            text: staged.text,
            editing: false,
            errors: None,
            answers,
        });
        Ok(staged.key)
    }
}

fn missing(kind: &str, key: EntryKey) -> AppError {
    AppError::NotFound(format!("No {} with key {}", kind, key))
}
