use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! server_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

server_id!(TopicId);
server_id!(QuizId);
server_id!(AttemptId);
server_id!(QuestionId);
server_id!(AnswerId);

impl TopicId {
    pub const NO_SELECTION: i64 = 0;
    pub const CREATE_NEW: i64 = -1;

    /// True for the two reserved select-control values, which never name a server topic.
    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::NO_SELECTION || self.0 == Self::CREATE_NEW
    }
}

/// Client-local key of an entry in an editable list. Keys are allocated once and never
/// reused, so an entry keeps its key while its neighbours are inserted or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(u64);

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    pub fn allocate(&mut self) -> EntryKey {
        self.next += 1;
        EntryKey(self.next)
    }
}
