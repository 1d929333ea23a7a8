use std::collections::HashMap;

use parking_lot::Mutex;

use super::{StorageBackend, StorageResult};

/// Non-durable map; lost on process exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    pub fn read(&self, name: &str) -> Option<String> {
        self.entries.lock().get(name).cloned()
    }

    pub fn write(&self, name: &str, value: &str) {
        self.entries
            .lock()
            .insert(name.to_string(), value.to_string());
    }

    /// Returns whether an entry was present
    pub fn delete(&self, name: &str) -> bool {
        self.entries.lock().remove(name).is_some()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, name: &str) -> StorageResult<Option<String>> {
        Ok(self.read(name))
    }

    fn set(&self, name: &str, value: &str) -> StorageResult<()> {
        self.write(name, value);
        Ok(())
    }

    fn remove(&self, name: &str) -> StorageResult<()> {
        self.delete(name);
        Ok(())
    }

    fn label(&self) -> &'static str {
        "memory"
    }
}
