//! Project record.

use super::{contains_folded, required, Record, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Lifecycle state shown as a badge in the projects table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planned,
    Active,
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Planned, Self::Active, Self::Done];

    /// Wire value, also used in `status-<value>` badge classes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Done => "done",
        }
    }

    /// Option label in status selects.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Active => "Active",
            Self::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub status: ProjectStatus,
    /// Weak reference to `User::id`; may point at a deleted user.
    pub owner_user_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub status: ProjectStatus,
    pub owner_user_id: Option<RecordId>,
}

impl ProjectDraft {
    /// Validates raw form values. An empty status falls back to `planned`,
    /// an empty owner means unassigned.
    pub fn parse(name: &str, status: &str, owner_user_id: &str) -> Result<Self, ValidationError> {
        let name = required("name", name)?;
        let status = if status.trim().is_empty() {
            ProjectStatus::Planned
        } else {
            ProjectStatus::parse(status)
                .ok_or_else(|| ValidationError::UnknownStatus(status.trim().to_string()))?
        };
        let owner = owner_user_id.trim();
        let owner_user_id = (!owner.is_empty()).then(|| RecordId::from(owner));

        Ok(Self {
            name,
            status,
            owner_user_id,
        })
    }
}

impl Record for Project {
    type Draft = ProjectDraft;

    const STORAGE_KEY: &'static str = "projects";
    const KIND: &'static str = "Project";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            status: draft.status,
            owner_user_id: draft.owner_user_id,
        }
    }

    fn apply(&mut self, draft: ProjectDraft) {
        self.name = draft.name;
        self.status = draft.status;
        self.owner_user_id = draft.owner_user_id;
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle) || self.status.as_str().contains(needle)
    }

    fn seed() -> Vec<Self> {
        [
            ("Website Redesign", ProjectStatus::Active),
            ("Mobile App", ProjectStatus::Planned),
            ("API Documentation", ProjectStatus::Done),
        ]
        .into_iter()
        .map(|(name, status)| Self {
            id: RecordId::generate(),
            name: name.to_string(),
            status,
            owner_user_id: None,
        })
        .collect()
    }
}
