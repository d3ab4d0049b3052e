/// Storage layer: an async key/value blob store
///
/// State is persisted as JSON blobs under a handful of well-known keys, with
/// no schema versioning of the blob contents. The concrete store is SQLite,
/// but the engine only ever sees the `BlobStore` trait.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Well-known blob keys
pub mod keys {
    /// Live tracker list
    pub const TRACKERS: &str = "trackers";
    /// Archived history ledger
    pub const HISTORY: &str = "history";
    /// Calendar day the live counts belong to
    pub const LAST_ACTIVE_DATE: &str = "last_active_date";
    /// Preferred daily reminder time
    pub const REMINDER_TIME: &str = "reminder_time";
}

/// Generic async key/value blob store over JSON strings
#[async_trait]
pub trait BlobStore {
    /// Load the blob stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a blob under `key`, replacing any previous value
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a single key
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every stored blob
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Load and decode a JSON blob, falling back to the type's default when the
/// key is missing or its value no longer parses. Malformed persisted state is
/// logged and discarded; it never surfaces as an error.
pub async fn load_json_or_default<T, S>(store: &S, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
    S: BlobStore + Sync + ?Sized,
{
    match store.load(key).await? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!("Discarding malformed blob for key {:?}: {}", key, err);
                Ok(T::default())
            }
        },
        None => Ok(T::default()),
    }
}

/// Encode a value as JSON and store it under `key`
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: BlobStore + Sync + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw).await
}
