use super::Backend;
use crate::error::{KvLockError, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-process backend backed by a `Mutex<HashMap<String, Vec<u8>>>`.
///
/// Share it between managers with an `Arc` to arbitrate between threads of
/// one process. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|e| KvLockError::BackendError(format!("memory backend poisoned: {}", e)))
    }
}

impl Backend for MemoryBackend {
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        let mut entries = self.entries()?;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(true)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries()?.remove(key).is_some())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }
}
