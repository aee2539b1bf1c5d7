//! User record.

use super::{contains_folded, required, Record, RecordId, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    /// Trims both fields, requires them, and checks the email shape.
    pub fn parse(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }
        Ok(Self { name, email })
    }
}

/// Loose `local@domain.tld` check; no whitespace, exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

impl Record for User {
    type Draft = UserDraft;

    const STORAGE_KEY: &'static str = "users";
    const KIND: &'static str = "User";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }

    fn apply(&mut self, draft: UserDraft) {
        self.name = draft.name;
        self.email = draft.email;
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle) || contains_folded(&self.email, needle)
    }

    fn seed() -> Vec<Self> {
        [
            ("John Doe", "john@example.com"),
            ("Jane Smith", "jane@example.com"),
            ("Mike Johnson", "mike@example.com"),
        ]
        .into_iter()
        .map(|(name, email)| Self {
            id: RecordId::generate(),
            name: name.to_string(),
            email: email.to_string(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann @example.com"));
        assert!(!is_valid_email("ann@@example.com"));
    }
}
