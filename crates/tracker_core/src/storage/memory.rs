//! In-process backend with an optional byte quota.

use super::{KeyValueStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Map-backed store. Size is counted as key bytes plus value bytes,
/// which is how the quota behaves in a browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any write that would push the total size over `limit_bytes`.
    pub fn with_quota(limit_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(limit_bytes),
        }
    }

    /// Returns the raw stored text, bypassing JSON decoding.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(limit_bytes) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit_bytes,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
