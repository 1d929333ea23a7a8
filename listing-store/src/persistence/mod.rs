//! Persistence adapter
//!
//! A string key-value store with two tiers: a durable [`StorageBackend`]
//! (normally [`RedbStorage`]) and an in-process fallback. [`TieredStorage`]
//! never reports an error to its caller; a failing durable tier degrades to
//! the fallback with a warning.

mod memory;
mod redb_storage;
mod snapshot;
mod tiered;

use thiserror::Error;

pub use memory::MemoryStorage;
pub use redb_storage::RedbStorage;
pub use snapshot::{PersistedState, SNAPSHOT_VERSION, SnapshotEnvelope, encode_snapshot};
pub use tiered::TieredStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A fallible string key-value medium
pub trait StorageBackend: Send + Sync {
    fn get(&self, name: &str) -> StorageResult<Option<String>>;

    fn set(&self, name: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, name: &str) -> StorageResult<()>;

    /// Short label used in log fields
    fn label(&self) -> &'static str;
}
