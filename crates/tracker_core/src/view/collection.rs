//! In-memory record collection bound to one storage key.
//!
//! # Invariants
//! - After every successful mutation the whole array is written back under
//!   `T::STORAGE_KEY`, in collection order, followed by any stored entries
//!   that did not decode as `T`.
//! - Sample records are written only when the key is absent or holds an
//!   empty array. Stored text that cannot be decoded is never overwritten.
//! - A failed write is logged by `Storage` and does not roll back memory.

use crate::model::{Record, RecordId};
use crate::storage::Storage;
use log::{info, warn};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub struct Collection<T: Record> {
    storage: Storage,
    records: Vec<T>,
    /// Stored entries of another shape, carried through every write.
    unreadable: Vec<Value>,
    /// Stored text was unreadable as an array; writes are refused.
    locked: bool,
}

impl<T: Record> Collection<T> {
    /// Loads the stored array, seeding and persisting sample records when it
    /// is empty or missing.
    pub fn load(storage: Storage) -> Self {
        let mut collection = Self {
            storage,
            records: Vec::new(),
            unreadable: Vec::new(),
            locked: false,
        };

        match collection.storage.read::<Vec<Value>>(T::STORAGE_KEY) {
            Ok(Some(entries)) if !entries.is_empty() => collection.decode(entries),
            Ok(_) => collection.seed(),
            Err(err) => {
                warn!(
                    "event=collection_load module=view status=error key={} error={err}",
                    T::STORAGE_KEY
                );
                collection.locked = true;
            }
        }
        collection
    }

    fn decode(&mut self, entries: Vec<Value>) {
        for entry in entries {
            match T::deserialize(&entry) {
                Ok(record) => self.records.push(record),
                Err(err) => {
                    warn!(
                        "event=collection_load module=view status=skipped key={} error={err}",
                        T::STORAGE_KEY
                    );
                    self.unreadable.push(entry);
                }
            }
        }
    }

    fn seed(&mut self) {
        self.records = T::seed();
        if self.records.is_empty() {
            return;
        }
        let persisted = self.persist();
        info!(
            "event=collection_seed module=view status=ok key={} records={} persisted={}",
            T::STORAGE_KEY,
            self.records.len(),
            persisted
        );
    }

    /// Stored entries kept as-is because they do not decode as `T`.
    pub fn unreadable(&self) -> &[Value] {
        &self.unreadable
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Records matching `query` case-insensitively; empty query keeps all.
    pub fn filtered(&self, query: &str) -> Vec<&T> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| needle.is_empty() || record.matches(&needle))
            .collect()
    }

    /// Appends a new record and returns its id plus the write status.
    pub fn insert(&mut self, draft: T::Draft) -> (RecordId, bool) {
        let id = RecordId::generate();
        self.records.push(T::from_draft(id.clone(), draft));
        (id, self.persist())
    }

    /// Applies `draft` in place; `None` when the id is unknown.
    pub fn update(&mut self, id: &RecordId, draft: T::Draft) -> Option<bool> {
        self.modify(id, |record| {
            record.apply(draft);
            true
        })
    }

    /// Runs `change` on the matching record and persists when it reports a
    /// change. `None` when the id is unknown or nothing changed.
    pub fn modify(&mut self, id: &RecordId, change: impl FnOnce(&mut T) -> bool) -> Option<bool> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        if !change(record) {
            return None;
        }
        Some(self.persist())
    }

    /// Removes exactly the record with `id`; `None` when it is unknown.
    pub fn remove(&mut self, id: &RecordId) -> Option<bool> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        self.records.remove(index);
        Some(self.persist())
    }

    fn persist(&self) -> bool {
        if self.locked {
            warn!(
                "event=collection_persist module=view status=refused key={} reason=unreadable_store",
                T::STORAGE_KEY
            );
            return false;
        }
        let snapshot = Snapshot {
            records: &self.records,
            unreadable: &self.unreadable,
        };
        self.storage.set(T::STORAGE_KEY, &snapshot).is_ok()
    }
}

/// Serializes as one JSON array: records first, then the kept entries.
struct Snapshot<'a, T> {
    records: &'a [T],
    unreadable: &'a [Value],
}

impl<T: Serialize> Serialize for Snapshot<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len() + self.unreadable.len()))?;
        for record in self.records {
            seq.serialize_element(record)?;
        }
        for entry in self.unreadable {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}
