//! Task record. Independent of projects and users.

use super::{contains_folded, required, Record, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    /// Entries written without the flag read as open tasks.
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub done: bool,
}

impl TaskDraft {
    pub fn parse(title: &str, done: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required("title", title)?,
            done,
        })
    }
}

impl Record for Task {
    type Draft = TaskDraft;

    const STORAGE_KEY: &'static str = "tasks";
    const KIND: &'static str = "Task";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            done: draft.done,
        }
    }

    fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.done = draft.done;
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle)
    }

    fn seed() -> Vec<Self> {
        Vec::new()
    }
}
