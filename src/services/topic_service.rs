use std::sync::Arc;

use crate::{
    errors::{ApiErrors, AppError, AppResult},
    models::{
        domain::{Topic, TopicMode, TopicSelection},
        ids::TopicId,
    },
    repositories::TopicRepository,
};

/// Topic list, the currently selected topic and the edit/create form state.
pub struct TopicDirectory {
    repository: Arc<dyn TopicRepository>,
    topics: Option<Vec<Topic>>,
    selection: TopicSelection,
    mode: TopicMode,
    pub new_topic_name: String,
    pub edit_topic_name: String,
    errors: Option<ApiErrors>,
}

impl TopicDirectory {
    pub fn new(repository: Arc<dyn TopicRepository>) -> Self {
        Self {
            repository,
            topics: None,
            selection: TopicSelection::NoSelection,
            mode: TopicMode::Viewing,
            new_topic_name: String::new(),
            edit_topic_name: String::new(),
            errors: None,
        }
    }

    pub fn topics(&self) -> &[Topic] {
        self.topics.as_deref().unwrap_or(&[])
    }

    pub fn selection(&self) -> TopicSelection {
        self.selection
    }

    pub fn mode(&self) -> TopicMode {
        self.mode
    }

    pub fn errors(&self) -> Option<&ApiErrors> {
        self.errors.as_ref()
    }

    pub async fn list(&mut self, force_refresh: bool) -> AppResult<&[Topic]> {
        if self.topics.is_none() || force_refresh {
            let result = self.repository.list().await;
            let topics = self.record(result)?;
            log::debug!("Fetched {} topics", topics.len());
            self.topics = Some(topics);
        }
        Ok(self.topics())
    }

    /// Creates a topic, selects it and refreshes the list.
    pub async fn create(&mut self, name: &str) -> AppResult<Topic> {
        let result = self.repository.create(name).await;
        let topic = self.record(result)?;
        log::info!("Created topic {} ({})", topic.name, topic.id);

        self.new_topic_name.clear();
        self.selection = TopicSelection::Topic(topic.id);
        self.edit_topic_name = topic.name.clone();
        self.mode = TopicMode::Viewing;
        self.errors = None;

        let created = topic.clone();
        self.refresh_after(move |topics| {
            if !topics.iter().any(|t| t.id == created.id) {
                topics.push(created);
            }
        })
        .await;
        Ok(topic)
    }

    pub async fn update(&mut self, id: TopicId, name: &str) -> AppResult<Topic> {
        ensure_real(id)?;
        let result = self.repository.update(id, name).await;
        let topic = self.record(result)?;
        log::info!("Renamed topic {} to {}", topic.id, topic.name);

        if self.selection == TopicSelection::Topic(id) {
            self.edit_topic_name = topic.name.clone();
        }
        self.mode = TopicMode::Viewing;
        self.errors = None;

        let renamed = topic.clone();
        self.refresh_after(move |topics| {
            if let Some(existing) = topics.iter_mut().find(|t| t.id == renamed.id) {
                *existing = renamed;
            }
        })
        .await;
        Ok(topic)
    }

    pub async fn delete(&mut self, id: TopicId) -> AppResult<()> {
        ensure_real(id)?;
        let result = self.repository.delete(id).await;
        self.record(result)?;
        log::info!("Deleted topic {}", id);

        if self.selection == TopicSelection::Topic(id) {
            self.selection = TopicSelection::NoSelection;
            self.edit_topic_name.clear();
        }
        self.mode = TopicMode::Viewing;
        self.errors = None;

        self.refresh_after(move |topics| topics.retain(|t| t.id != id))
            .await;
        Ok(())
    }

    pub fn select(&mut self, control_value: i64) -> AppResult<TopicSelection> {
        let selection = TopicSelection::from_control_value(control_value);

        match selection {
            TopicSelection::NoSelection => {
                self.mode = TopicMode::Viewing;
                self.edit_topic_name.clear();
            }
            TopicSelection::CreateNew => {
                self.mode = TopicMode::Creating;
            }
            TopicSelection::Topic(id) => {
                let name = self
                    .topics()
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| t.name.clone())
                    .ok_or_else(|| AppError::NotFound(format!("Topic {} is not in the list", id)))?;
                self.edit_topic_name = name;
                self.mode = TopicMode::Viewing;
            }
        }

        self.selection = selection;
        Ok(selection)
    }

    pub fn toggle_edit_mode(&mut self) -> AppResult<TopicMode> {
        if self.selection.topic_id().is_none() {
            return Err(AppError::BadRequest("Select a topic to edit".to_string()));
        }

        self.mode = match self.mode {
            TopicMode::Editing => TopicMode::Viewing,
            _ => TopicMode::Editing,
        };
        Ok(self.mode)
    }

    /// Re-fetches the list after a successful change. When the fetch fails the change is
    /// applied to the cached list instead and the failure stays in `errors`.
    async fn refresh_after<F>(&mut self, patch: F)
    where
        F: FnOnce(&mut Vec<Topic>),
    {
        if self.list(true).await.is_err() {
            if let Some(topics) = self.topics.as_mut() {
                patch(topics);
            }
        }
    }

    fn record<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            log::warn!("Topic request failed: {}", err);
            self.errors = Some(err.display_errors());
        }
        result
    }
}

fn ensure_real(id: TopicId) -> AppResult<()> {
    if id.is_sentinel() {
        return Err(AppError::BadRequest(format!(
            "{} is a reserved selector value, not a topic id",
            id
        )));
    }
    Ok(())
}
