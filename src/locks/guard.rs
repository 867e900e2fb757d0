//! RAII guard for a single named lock.

use super::manager::LockManager;
use crate::backend::Backend;
use std::fmt;
use tracing::warn;

/// Holds one lock acquired through a [`LockManager`].
///
/// When dropped, the lock is released through the manager. If the release
/// fails, a warning is logged and the name stays in the manager's ownership
/// set, so the manager retries when it is dropped itself.
pub struct LockGuard<'a, B: Backend + ?Sized> {
    manager: &'a LockManager<B>,
    name: String,
    released: bool,
}

impl<'a, B: Backend + ?Sized> LockGuard<'a, B> {
    pub(super) fn new(manager: &'a LockManager<B>, name: String) -> Self {
        Self {
            manager,
            name,
            released: false,
        }
    }

    /// Name of the guarded lock.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the lock now and report whether the backend delete succeeded.
    pub fn release(mut self) -> bool {
        self.released = true;
        self.manager.release(&self.name)
    }
}

impl<B: Backend + ?Sized> Drop for LockGuard<'_, B> {
    fn drop(&mut self) {
        if !self.released && !self.manager.release(&self.name) {
            warn!(lock = %self.name, "Failed to release guarded lock");
        }
    }
}

impl<B: Backend + ?Sized> fmt::Debug for LockGuard<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("name", &self.name)
            .field("released", &self.released)
            .finish()
    }
}
