//! Tracker domain records and their validation rules.
//!
//! # Responsibility
//! - Define the three persisted record kinds and their JSON wire shape.
//! - Turn trimmed form input into validated drafts.
//!
//! # Invariants
//! - A record's `id` never changes after creation.
//! - Required text fields are non-empty after trimming.
//! - `Project::owner_user_id` is a weak link; nothing cascades on user deletion.

pub mod id;
pub mod project;
pub mod task;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use id::RecordId;

/// Rejection reason for add/save input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    EmptyField(&'static str),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Status value is not one of `planned|active|done`.
    UnknownStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Please fill in the {field} field"),
            Self::InvalidEmail(_) => write!(f, "Please enter a valid email address"),
            Self::UnknownStatus(value) => write!(f, "Unknown project status `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Shared behavior of the persisted record kinds.
///
/// Each kind owns one storage key holding a JSON array of records.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Validated input for create and in-place update.
    type Draft;

    /// Key of the JSON array in the key/value store.
    const STORAGE_KEY: &'static str;
    /// Human label used in notices (`"Project added successfully"`).
    const KIND: &'static str;

    fn id(&self) -> &RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Overwrites every editable field; `id` is kept.
    fn apply(&mut self, draft: Self::Draft);

    /// Case-insensitive substring match; `needle` is already lowercase.
    fn matches(&self, needle: &str) -> bool;

    /// Sample records written on first use of an empty store.
    fn seed() -> Vec<Self>;
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
