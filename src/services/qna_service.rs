use std::sync::Arc;

use crate::{
    errors::{ApiErrors, AppError, AppResult},
    models::{
        domain::QnaTree,
        dto::request::{CreateQnaRequest, TextUpdateRequest},
        ids::{EntryKey, TopicId},
    },
    repositories::QnaRepository,
};

/// Question/answer bank editor for one topic.
///
/// Failures of per-item calls are stored on the item itself (`errors`) so they can be shown
/// inline; the tree is otherwise left as it was before the call.
pub struct QnaEditor {
    repository: Arc<dyn QnaRepository>,
    tree: Option<QnaTree>,
    errors: Option<ApiErrors>,
}

impl QnaEditor {
    pub fn new(repository: Arc<dyn QnaRepository>) -> Self {
        Self {
            repository,
            tree: None,
            errors: None,
        }
    }

    pub fn tree(&self) -> Option<&QnaTree> {
        self.tree.as_ref()
    }

    pub fn errors(&self) -> Option<&ApiErrors> {
        self.errors.as_ref()
    }

    pub async fn load(&mut self, topic_id: TopicId) -> AppResult<&QnaTree> {
        if topic_id.is_sentinel() {
            return Err(AppError::BadRequest("Select a topic first".to_string()));
        }

        let result = self.repository.fetch_tree(topic_id).await;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Failed to load QNA for topic {}: {}", topic_id, err);
                self.errors = Some(err.display_errors());
                return Err(err);
            }
        };

        let tree = QnaTree::from_response(response);
        log::debug!(
            "Loaded {} questions for topic {}",
            tree.questions.len(),
            topic_id
        );
        self.errors = None;
        Ok(self.tree.insert(tree))
    }

    // Persisted questions

    pub fn toggle_question_edit(&mut self, question: EntryKey) -> AppResult<bool> {
        let question = self.loaded_mut()?.question_mut(question)?;
        question.editing = !question.editing;
        Ok(question.editing)
    }

    pub fn set_question_text(&mut self, question: EntryKey, text: &str) -> AppResult<()> {
        self.loaded_mut()?.question_mut(question)?.text = text.to_string();
        Ok(())
    }

    pub async fn update_question(&mut self, key: EntryKey) -> AppResult<()> {
        let tree = self.loaded()?;
        let question = tree.question(key)?;
        let id = question.id;
        let request = TextUpdateRequest {
            topic: tree.topic_id,
            text: question.text.clone(),
        };

        let result = self.repository.update_question(id, &request).await;
        let question = self.loaded_mut()?.question_mut(key)?;
        record(&mut question.errors, result)?;
        question.editing = false;
        Ok(())
    }

    pub async fn delete_question(&mut self, key: EntryKey) -> AppResult<()> {
        let tree = self.loaded()?;
        let topic_id = tree.topic_id;
        let id = tree.question(key)?.id;

        let result = self.repository.delete_question(id, topic_id).await;
        let tree = self.loaded_mut()?;
        record(&mut tree.question_mut(key)?.errors, result)?;
        tree.remove_question(key)?;
        log::info!("Deleted question {} from topic {}", id, topic_id);
        Ok(())
    }

    // Answers of persisted questions

    pub fn toggle_answer_edit(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<bool> {
        let answer = self.loaded_mut()?.answer_mut(question, answer)?;
        answer.editing = !answer.editing;
        Ok(answer.editing)
    }

    pub fn set_answer_text(&mut self, question: EntryKey, answer: EntryKey, text: &str) -> AppResult<()> {
        self.loaded_mut()?.answer_mut(question, answer)?.text = text.to_string();
        Ok(())
    }

    /// PUTs the answer's text. Staged answers have nothing to update and must be created.
    pub async fn update_answer(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<()> {
        let tree = self.loaded()?;
        let topic = tree.topic_id;
        let entry = tree.answer(question, answer)?;
        let id = entry.id.ok_or_else(|| {
            AppError::BadRequest(format!("Answer {} has not been created yet", answer))
        })?;
        let request = TextUpdateRequest {
            topic,
            text: entry.text.clone(),
        };

        let result = self.repository.update_answer(id, &request).await;
        let entry = self.loaded_mut()?.answer_mut(question, answer)?;
        record(&mut entry.errors, result)?;
        entry.editing = false;
        Ok(())
    }

    /// Persisted answers are deleted remotely first; staged answers are just dropped.
    pub async fn delete_answer(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<()> {
        let tree = self.loaded()?;
        let question_id = tree.question(question)?.id;
        let answer_id = tree.answer(question, answer)?.id;

        if let Some(id) = answer_id {
            let result = self.repository.delete_answer(id, question_id).await;
            let entry = self.loaded_mut()?.answer_mut(question, answer)?;
            record(&mut entry.errors, result)?;
            log::info!("Deleted answer {} of question {}", id, question_id);
        }

        self.loaded_mut()?.remove_answer(question, answer)?;
        Ok(())
    }

    pub fn add_answer(&mut self, question: EntryKey) -> AppResult<EntryKey> {
        self.loaded_mut()?.push_answer(question)
    }

    /// Creates a staged answer of a persisted question and assigns the returned id. The
    /// server may create the answer without reporting its id; the answer then stays staged.
    pub async fn create_answer(&mut self, question: EntryKey, answer: EntryKey) -> AppResult<()> {
        let tree = self.loaded()?;
        let parent = tree.question(question)?;
        let entry = tree.answer(question, answer)?;
        if !entry.is_staged() {
            return Err(AppError::BadRequest(format!(
                "Answer {} already exists on the server",
                answer
            )));
        }
        let request = CreateQnaRequest {
            topic: tree.topic_id,
            question: parent.text.clone(),
            answers: vec![entry.text.clone()],
        };

        let result = self.repository.create(&request).await;
        let entry = self.loaded_mut()?.answer_mut(question, answer)?;
        let created = record(&mut entry.errors, result)?;
        entry.editing = false;
        match created.answers.first() {
            Some(id) => entry.id = Some(*id),
            None => log::warn!(
                "Answer {} was created but no id came back; reload topic {} to edit it",
                answer,
                created.topic
            ),
        }
        Ok(())
    }

    // Staged questions

    pub fn add_question(&mut self) -> AppResult<EntryKey> {
        Ok(self.loaded_mut()?.stage_question())
    }

    pub fn add_staged_answer(&mut self, staged: EntryKey) -> AppResult<EntryKey> {
        self.loaded_mut()?.stage_answer(staged)
    }

    pub fn set_staged_question_text(&mut self, staged: EntryKey, text: &str) -> AppResult<()> {
        self.loaded_mut()?.staged_mut(staged)?.text = text.to_string();
        Ok(())
    }

    pub fn set_staged_answer_text(&mut self, staged: EntryKey, answer: EntryKey, text: &str) -> AppResult<()> {
        self.loaded_mut()?.staged_answer_mut(staged, answer)?.text = text.to_string();
        Ok(())
    }

    pub fn remove_staged_question(&mut self, staged: EntryKey) -> AppResult<()> {
        self.loaded_mut()?.remove_staged(staged).map(|_| ())
    }

    pub fn remove_staged_answer(&mut self, staged: EntryKey, answer: EntryKey) -> AppResult<()> {
        self.loaded_mut()?.remove_staged_answer(staged, answer).map(|_| ())
    }

    /// POSTs a staged question with its non-blank answers and moves it into the persisted list.
    pub async fn create_question(&mut self, staged: EntryKey) -> AppResult<EntryKey> {
        let tree = self.loaded()?;
        let request = tree.staged(staged)?.to_request(tree.topic_id);

        let result = self.repository.create(&request).await;
        let tree = self.loaded_mut()?;
        let created = record(&mut tree.staged_mut(staged)?.errors, result)?;
        let key = tree.promote(staged, &created)?;
        log::info!(
            "Created question {} in topic {}",
            created.question,
            created.topic
        );
        Ok(key)
    }

    fn loaded(&self) -> AppResult<&QnaTree> {
        self.tree
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No topic has been loaded".to_string()))
    }

    fn loaded_mut(&mut self) -> AppResult<&mut QnaTree> {
        self.tree
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No topic has been loaded".to_string()))
    }
}

fn record<T>(slot: &mut Option<ApiErrors>, result: AppResult<T>) -> AppResult<T> {
    match &result {
        Ok(_) => *slot = None,
        Err(err) => {
            log::warn!("QNA request failed: {}", err);
            *slot = Some(err.display_errors());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            dto::response::CreateQnaResponse,
            ids::{AnswerId, QuestionId},
        },
        repositories::MockQnaRepository,
        test_utils::fixtures::qna_response,
    };
    use mockall::predicate::eq;

    async fn loaded(mut mock: MockQnaRepository) -> QnaEditor {
        mock.expect_fetch_tree()
            .with(eq(TopicId::new(4)))
            .returning(|_| Ok(qna_response()));
        let mut editor = QnaEditor::new(Arc::new(mock));
        editor.load(TopicId::new(4)).await.unwrap();
        editor
    }

    fn first_question(editor: &QnaEditor) -> EntryKey {
        editor.tree().unwrap().questions[0].key
    }

    #[tokio::test]
    async fn test_load_rejects_sentinel() {
        let mut mock = MockQnaRepository::new();
        mock.expect_fetch_tree().times(0);

        let mut editor = QnaEditor::new(Arc::new(mock));
        assert!(matches!(editor.load(TopicId::new(-1)).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_load_replaces_unsaved_edits() {
        let mut editor = loaded(MockQnaRepository::new()).await;
        let q = first_question(&editor);
        editor.set_question_text(q, "edited locally").unwrap();
        editor.add_question().unwrap();

        let tree = editor.load(TopicId::new(4)).await.unwrap();
        assert_eq!(tree.questions[0].text, "Capital of France?");
        assert!(tree.staged.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_question_edit_is_local() {
        let mut editor = loaded(MockQnaRepository::new()).await;
        let q = first_question(&editor);

        assert!(editor.toggle_question_edit(q).unwrap());
        assert!(!editor.toggle_question_edit(q).unwrap());
    }

    #[tokio::test]
    async fn test_update_question_puts_text_and_leaves_edit_mode() {
        let mut mock = MockQnaRepository::new();
        mock.expect_update_question()
            .withf(|id, request| {
                *id == QuestionId::new(10) && request.topic == TopicId::new(4) && request.text == "Capital city of France?"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        editor.toggle_question_edit(q).unwrap();
        editor.set_question_text(q, "Capital city of France?").unwrap();
        editor.update_question(q).await.unwrap();

        let question = editor.tree().unwrap().question(q).unwrap();
        assert!(!question.editing);
        assert!(question.errors.is_none());
    }

    #[tokio::test]
    async fn test_update_answer_failure_is_captured_on_the_item() {
        let mut mock = MockQnaRepository::new();
        mock.expect_update_answer().times(1).returning(|_, _| {
            Err(AppError::Api {
                status: 400,
                errors: ApiErrors::from_body(r#"{"text":["This field may not be blank."]}"#),
            })
        });

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        let a = editor.tree().unwrap().questions[0].answers[0].key;
        editor.toggle_answer_edit(q, a).unwrap();
        editor.set_answer_text(q, a, "").unwrap();

        assert!(editor.update_answer(q, a).await.is_err());
        let answer = editor.tree().unwrap().answer(q, a).unwrap();
        assert_eq!(
            answer.errors.as_ref().unwrap().field("text"),
            vec!["This field may not be blank.".to_string()]
        );
        assert!(answer.editing);
    }

    #[tokio::test]
    async fn test_update_staged_answer_is_rejected() {
        let mut mock = MockQnaRepository::new();
        mock.expect_update_answer().times(0);

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        let staged = editor.add_answer(q).unwrap();

        assert!(matches!(editor.update_answer(q, staged).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_persisted_answer_removes_exactly_that_entry() {
        let mut mock = MockQnaRepository::new();
        mock.expect_delete_answer()
            .with(eq(AnswerId::new(100)), eq(QuestionId::new(10)))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        let first = editor.tree().unwrap().questions[0].answers[0].key;
        editor.delete_answer(q, first).await.unwrap();

        let answers = &editor.tree().unwrap().questions[0].answers;
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].id, Some(AnswerId::new(101)));
    }

    #[tokio::test]
    async fn test_delete_staged_answer_makes_no_call() {
        let mut mock = MockQnaRepository::new();
        mock.expect_delete_answer().times(0);

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        let staged = editor.add_answer(q).unwrap();
        editor.delete_answer(q, staged).await.unwrap();

        assert_eq!(editor.tree().unwrap().questions[0].answers.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_the_answer() {
        let mut mock = MockQnaRepository::new();
        mock.expect_delete_answer()
            .returning(|_, _| Err(AppError::Network("timed out".to_string())));

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        let a = editor.tree().unwrap().questions[0].answers[0].key;

        assert!(editor.delete_answer(q, a).await.is_err());
        let answer = editor.tree().unwrap().answer(q, a).unwrap();
        assert!(answer.errors.is_some());
    }

    #[tokio::test]
    async fn test_delete_question_sends_topic_and_removes_locally() {
        let mut mock = MockQnaRepository::new();
        mock.expect_delete_question()
            .with(eq(QuestionId::new(10)), eq(TopicId::new(4)))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut editor = loaded(mock).await;
        let q = first_question(&editor);
        editor.delete_question(q).await.unwrap();

        let tree = editor.tree().unwrap();
        assert_eq!(tree.questions.len(), 1);
        assert_eq!(tree.questions[0].id, QuestionId::new(11));
    }

    #[tokio::test]
    async fn test_create_answer_assigns_server_id() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create()
            .withf(|request| {
                request.question == "Capital of Peru?" && request.answers == vec!["Lima".to_string()]
            })
            .times(1)
            .returning(|request| {
                Ok(CreateQnaResponse {
                    topic: request.topic,
                    question: QuestionId::new(11),
                    answers: vec![AnswerId::new(300)],
                })
            });

        let mut editor = loaded(mock).await;
        let q = editor.tree().unwrap().questions[1].key;
        let a = editor.add_answer(q).unwrap();
        editor.set_answer_text(q, a, "Lima").unwrap();
        editor.create_answer(q, a).await.unwrap();

        let answer = editor.tree().unwrap().answer(q, a).unwrap();
        assert_eq!(answer.id, Some(AnswerId::new(300)));
        assert!(!answer.editing);
    }

    #[tokio::test]
    async fn test_create_answer_without_returned_id_stays_staged() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create().times(1).returning(|request| {
            Ok(CreateQnaResponse {
                topic: request.topic,
                question: QuestionId::new(11),
                answers: vec![],
            })
        });

        let mut editor = loaded(mock).await;
        let q = editor.tree().unwrap().questions[1].key;
        let a = editor.add_answer(q).unwrap();
        editor.set_answer_text(q, a, "Lima").unwrap();
        editor.create_answer(q, a).await.unwrap();

        let answer = editor.tree().unwrap().answer(q, a).unwrap();
        assert_eq!(answer.text, "Lima");
        assert!(answer.is_staged());
        assert!(answer.errors.is_none());
    }

    #[tokio::test]
    async fn test_create_question_keeps_answers_missing_from_response() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create().times(1).returning(|_| {
            Ok(CreateQnaResponse {
                topic: TopicId::new(4),
                question: QuestionId::new(12),
                answers: vec![AnswerId::new(400)],
            })
        });

        let mut editor = loaded(mock).await;
        let staged = editor.add_question().unwrap();
        editor.set_staged_question_text(staged, "Largest planet?").unwrap();
        let jupiter = editor.add_staged_answer(staged).unwrap();
        editor.set_staged_answer_text(staged, jupiter, "Jupiter").unwrap();
        let giant = editor.add_staged_answer(staged).unwrap();
        editor.set_staged_answer_text(staged, giant, "Gas giant").unwrap();

        let key = editor.create_question(staged).await.unwrap();

        let tree = editor.tree().unwrap();
        assert_eq!(tree.question(key).unwrap().answers.len(), 2);
        assert_eq!(tree.answer(key, giant).unwrap().text, "Gas giant");
        assert!(tree.answer(key, jupiter).unwrap().is_staged());
    }

    #[tokio::test]
    async fn test_create_question_promotes_staged_entry() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create()
            .withf(|request| {
                request.topic == TopicId::new(4)
                    && request.question == "Capital of Chile?"
                    && request.answers == vec!["Santiago".to_string()]
            })
            .times(1)
            .returning(|_| {
                Ok(CreateQnaResponse {
                    topic: TopicId::new(4),
                    question: QuestionId::new(12),
                    answers: vec![AnswerId::new(400)],
                })
            });

        let mut editor = loaded(mock).await;
        let staged = editor.add_question().unwrap();
        editor.set_staged_question_text(staged, "Capital of Chile?").unwrap();
        let a = editor.add_staged_answer(staged).unwrap();
        editor.set_staged_answer_text(staged, a, "Santiago").unwrap();
        let blank = editor.add_staged_answer(staged).unwrap();
        editor.remove_staged_answer(staged, blank).unwrap();

        let key = editor.create_question(staged).await.unwrap();

        let tree = editor.tree().unwrap();
        assert!(tree.staged.is_empty());
        assert_eq!(tree.question(key).unwrap().id, QuestionId::new(12));
        assert_eq!(tree.answer(key, a).unwrap().id, Some(AnswerId::new(400)));
    }

    #[tokio::test]
    async fn test_create_question_failure_stays_staged_with_errors() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create().times(1).returning(|_| {
            Err(AppError::Api {
                status: 400,
                errors: ApiErrors::from_body(r#"{"question":["This field may not be blank."]}"#),
            })
        });

        let mut editor = loaded(mock).await;
        let staged = editor.add_question().unwrap();

        assert!(editor.create_question(staged).await.is_err());
        let entry = editor.tree().unwrap().staged(staged).unwrap();
        assert_eq!(entry.errors.as_ref().unwrap().field("question").len(), 1);
    }

    #[tokio::test]
    async fn test_remove_staged_question_needs_no_network() {
        let mut mock = MockQnaRepository::new();
        mock.expect_create().times(0);

        let mut editor = loaded(mock).await;
        let staged = editor.add_question().unwrap();
        editor.remove_staged_question(staged).unwrap();

        assert!(editor.tree().unwrap().staged.is_empty());
    }

    #[test]
    fn test_edits_without_load_are_not_found() {
        let mut editor = QnaEditor::new(Arc::new(MockQnaRepository::new()));
        assert!(matches!(editor.add_question(), Err(AppError::NotFound(_))));
    }
}
