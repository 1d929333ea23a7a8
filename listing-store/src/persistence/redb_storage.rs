//! redb-based durable key-value storage

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{StorageBackend, StorageError, StorageResult};

/// KV table: key = storage name, value = serialized text
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Durable storage backed by a single redb file
#[derive(Clone)]
pub struct RedbStorage {
    db: Arc<Database>,
    /// Per-value byte limit
    quota: Option<usize>,
}

impl RedbStorage {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }
        Self::init(Database::create(path)?)
    }

    /// Open in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            quota: None,
        })
    }

    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }
}

impl StorageBackend for RedbStorage {
    fn get(&self, name: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(name)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, name: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit,
            });
        }

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(name, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, name: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(name)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "redb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_crud() {
        let storage = RedbStorage::open_in_memory().unwrap();

        assert_eq!(storage.get("product-store").unwrap(), None);
        storage.set("product-store", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get("product-store").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.set("product-store", "{}").unwrap();
        assert_eq!(storage.get("product-store").unwrap().as_deref(), Some("{}"));

        storage.remove("product-store").unwrap();
        assert_eq!(storage.get("product-store").unwrap(), None);
        // removing a missing key is fine
        storage.remove("product-store").unwrap();
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let storage = RedbStorage::open_in_memory().unwrap().with_quota(Some(4));
        storage.set("k", "1234").unwrap();
        let err = storage.set("k", "12345").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 5, limit: 4 }));
        // previous value survives
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/listings.redb");
        {
            let storage = RedbStorage::open(&path).unwrap();
            storage.set("k", "v").unwrap();
        }
        let storage = RedbStorage::open(&path).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
