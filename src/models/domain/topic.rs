use serde::{Deserialize, Serialize};

use crate::models::ids::TopicId;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

impl Topic {
    pub fn new(id: TopicId, name: &str) -> Self {
        Topic {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TopicSelection {
    #[default]
    NoSelection,
    CreateNew,
    Topic(TopicId),
}

impl TopicSelection {
    pub fn from_control_value(value: i64) -> Self {
        match value {
            TopicId::NO_SELECTION => TopicSelection::NoSelection,
            TopicId::CREATE_NEW => TopicSelection::CreateNew,
            id => TopicSelection::Topic(TopicId::new(id)),
        }
    }

    pub fn control_value(&self) -> i64 {
        match self {
            TopicSelection::NoSelection => TopicId::NO_SELECTION,
            TopicSelection::CreateNew => TopicId::CREATE_NEW,
            TopicSelection::Topic(id) => id.value(),
        }
    }

    pub fn topic_id(&self) -> Option<TopicId> {
        match self {
            TopicSelection::Topic(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TopicMode {
    #[default]
    Viewing,
    Editing,
    Creating,
}
