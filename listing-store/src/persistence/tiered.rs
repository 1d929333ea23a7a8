use std::path::Path;

use super::{MemoryStorage, RedbStorage, StorageBackend};

/// Durable tier + in-process fallback
///
/// - `set` failure on the durable tier writes the fallback map instead, so
///   the value "shadows" whatever the durable tier still holds.
/// - `get` prefers a shadow, then the durable tier, then the fallback again
///   if the durable read fails.
pub struct TieredStorage {
    primary: Option<Box<dyn StorageBackend>>,
    fallback: MemoryStorage,
}

impl TieredStorage {
    /// Wrap an arbitrary durable backend
    pub fn new(primary: impl StorageBackend + 'static) -> Self {
        Self {
            primary: Some(Box::new(primary)),
            fallback: MemoryStorage::new(),
        }
    }

    /// Fallback tier only; nothing survives a restart
    pub fn in_memory() -> Self {
        Self {
            primary: None,
            fallback: MemoryStorage::new(),
        }
    }

    /// Open a redb file as the durable tier.
    ///
    /// An unopenable file is not fatal: the adapter starts in fallback-only
    /// mode.
    pub fn open(path: impl AsRef<Path>, quota: Option<usize>) -> Self {
        let path = path.as_ref();
        match RedbStorage::open(path) {
            Ok(storage) => {
                tracing::info!(path = %path.display(), "Durable storage opened");
                Self::new(storage.with_quota(quota))
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Durable storage unavailable, using in-memory fallback"
                );
                Self::in_memory()
            }
        }
    }

    /// Whether a durable tier is attached
    pub fn is_durable(&self) -> bool {
        self.primary.is_some()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(shadow) = self.fallback.read(name) {
            return Some(shadow);
        }
        let primary = self.primary.as_ref()?;
        match primary.get(name) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    key = %name,
                    backend = primary.label(),
                    error = %e,
                    "Storage read failed, using in-memory fallback"
                );
                self.fallback.read(name)
            }
        }
    }

    pub fn set(&self, name: &str, value: &str) {
        let Some(primary) = self.primary.as_ref() else {
            self.fallback.write(name, value);
            return;
        };
        match primary.set(name, value) {
            Ok(()) => {
                self.fallback.delete(name);
            }
            Err(e) => {
                tracing::warn!(
                    key = %name,
                    backend = primary.label(),
                    bytes = value.len(),
                    error = %e,
                    "Storage write failed, using in-memory fallback"
                );
                self.fallback.write(name, value);
            }
        }
    }

    pub fn remove(&self, name: &str) {
        self.fallback.delete(name);
        if let Some(primary) = self.primary.as_ref()
            && let Err(e) = primary.remove(name)
        {
            tracing::warn!(
                key = %name,
                backend = primary.label(),
                error = %e,
                "Storage remove failed"
            );
        }
    }
}

impl std::fmt::Debug for TieredStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredStorage")
            .field("primary", &self.primary.as_ref().map(|p| p.label()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{StorageError, StorageResult};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory-backed medium whose operations can be switched to fail
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: Arc<MemoryStorage>,
        fail_writes: Arc<AtomicBool>,
        fail_reads: Arc<AtomicBool>,
    }

    impl StorageBackend for FlakyStorage {
        fn get(&self, name: &str) -> StorageResult<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("read disabled".into()));
            }
            self.inner.get(name)
        }

        fn set(&self, name: &str, value: &str) -> StorageResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::QuotaExceeded {
                    size: value.len(),
                    limit: 0,
                });
            }
            self.inner.set(name, value)
        }

        fn remove(&self, name: &str) -> StorageResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("write disabled".into()));
            }
            self.inner.remove(name)
        }

        fn label(&self) -> &'static str {
            "flaky"
        }
    }

    #[test]
    fn test_primary_roundtrip() {
        let media = FlakyStorage::default();
        let storage = TieredStorage::new(media.clone());
        storage.set("k", "v1");
        assert_eq!(storage.get("k").as_deref(), Some("v1"));
        assert_eq!(media.inner.read("k").as_deref(), Some("v1"));
        assert!(storage.is_durable());
    }

    #[test]
    fn test_failed_set_falls_back() {
        let media = FlakyStorage::default();
        let storage = TieredStorage::new(media.clone());
        storage.set("k", "old");

        media.fail_writes.store(true, Ordering::SeqCst);
        storage.set("k", "new");

        // durable tier still holds the stale value, fallback wins
        assert_eq!(media.inner.read("k").as_deref(), Some("old"));
        assert_eq!(storage.get("k").as_deref(), Some("new"));

        // a later successful write drops the shadow
        media.fail_writes.store(false, Ordering::SeqCst);
        storage.set("k", "newest");
        assert_eq!(storage.get("k").as_deref(), Some("newest"));
        assert!(!storage.fallback.contains("k"));
    }

    #[test]
    fn test_failed_read_uses_fallback() {
        let media = FlakyStorage::default();
        let storage = TieredStorage::new(media.clone());
        storage.set("k", "v");

        media.fail_reads.store(true, Ordering::SeqCst);
        assert_eq!(storage.get("k"), None);

        media.fail_writes.store(true, Ordering::SeqCst);
        storage.set("k", "v2");
        assert_eq!(storage.get("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_remove_never_panics() {
        let media = FlakyStorage::default();
        let storage = TieredStorage::new(media.clone());
        storage.set("k", "v");
        media.fail_writes.store(true, Ordering::SeqCst);
        storage.remove("k");
        // the durable tier could not delete it
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_open_unusable_path_degrades() {
        let dir = tempfile::tempdir().unwrap();
        // a directory is not a valid database file
        let storage = TieredStorage::open(dir.path(), None);
        assert!(!storage.is_durable());
        storage.set("k", "v");
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_open_redb_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.redb");
        let storage = TieredStorage::open(&path, Some(1024));
        assert!(storage.is_durable());
        storage.set("k", "v");
        drop(storage);

        let reopened = TieredStorage::open(&path, Some(1024));
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }
}
