//! Storage backends that arbitrate lock ownership.
//!
//! A backend only has to provide three operations, each atomic with respect
//! to every other caller of the same store (threads, processes, or hosts):
//!
//! - `add_if_absent`: insert a value only if the key is free
//! - `delete`: remove a key
//! - `read`: fetch the value stored under a key, if any
//!
//! Mutual exclusion comes entirely from `add_if_absent`. The lock manager
//! treats every `Err` the same as a failed attempt, so adapters should return
//! errors for infrastructure failures rather than panicking.

mod file;
mod memory;

pub use file::{FileBackend, StoredLock, decode_name, encode_name};
pub use memory::MemoryBackend;

use crate::error::Result;
use std::sync::Arc;

/// Atomic key-value primitives consumed by [`LockManager`](crate::locks::LockManager).
pub trait Backend: Send + Sync {
    /// Store `value` under `key` only if `key` is not present.
    ///
    /// Returns `Ok(true)` if the value was inserted, `Ok(false)` if the key
    /// was already taken.
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool>;

    /// Remove `key`.
    ///
    /// Returns `Ok(true)` if the key existed and was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Read the value stored under `key`, or `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        (**self).add_if_absent(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        (**self).add_if_absent(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }
}
