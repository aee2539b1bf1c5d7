//! Persistence adapter over a key/value text store.
//!
//! # Responsibility
//! - Define the `KeyValueStore` backend contract (raw text in, raw text out).
//! - Provide `Storage`, the JSON-encoding adapter every view persists through.
//!
//! # Invariants
//! - `Storage::get` never fails: absent, empty or undecodable entries yield
//!   the caller's default.
//! - `Storage::read` tells absent or empty entries (`Ok(None)`) apart from
//!   entries that exist but cannot be read or decoded (`Err`).
//! - `Storage::set` writes the full encoded value or reports why it could not.
//! - `Storage::remove` succeeds when the key is already absent.

use crate::db::DbError;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a backend or by the JSON layer.
#[derive(Debug)]
pub enum StoreError {
    /// Value could not be encoded as JSON.
    Encode(serde_json::Error),
    /// Stored text under `key` is not the expected JSON shape.
    Decode { key: String, source: serde_json::Error },
    /// Backend refused the write because it would exceed its byte budget.
    QuotaExceeded { key: String, limit_bytes: usize },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode value: {err}"),
            Self::Decode { key, source } => write!(f, "failed to decode `{key}`: {source}"),
            Self::QuotaExceeded { key, limit_bytes } => write!(
                f,
                "writing `{key}` exceeds the store quota of {limit_bytes} bytes"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::QuotaExceeded { .. } => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw text backend, shaped like browser local storage.
///
/// Methods take `&self`; implementations keep their own interior state so
/// one backend can be shared by every view through `Rc`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// JSON adapter shared by the router and every mounted view.
#[derive(Clone)]
pub struct Storage {
    backend: Rc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Wraps a backend the caller keeps a handle to (tests inspect it).
    pub fn from_shared(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Convenience constructor for a fresh unbounded in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Returns the decoded value under `key`, or `default`.
    ///
    /// Read errors and decode errors are logged at debug level only.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                debug!("event=storage_read module=storage status=fallback key={key} error={err}");
                default
            }
        }
    }

    /// Decodes the value under `key`; `Ok(None)` when absent or empty.
    ///
    /// # Errors
    /// - `StoreError::Decode` when the stored text is not a `T`.
    /// - Any backend read error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.backend.get_item(key)? {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
            _ => Ok(None),
        }
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// # Errors
    /// - `StoreError::Encode` when serialization fails.
    /// - Any backend write error (quota, SQLite).
    ///
    /// Failures are logged here; callers only decide whether to react.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let result = serde_json::to_string(value)
            .map_err(StoreError::Encode)
            .and_then(|encoded| self.backend.set_item(key, &encoded));

        if let Err(err) = &result {
            error!("event=storage_write module=storage status=error key={key} error={err}");
        }
        result
    }

    /// Deletes `key`; a missing key is not an error.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let result = self.backend.remove_item(key);
        if let Err(err) = &result {
            error!("event=storage_remove module=storage status=error key={key} error={err}");
        }
        result
    }
}
