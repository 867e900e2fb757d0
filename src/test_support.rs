use crate::backend::{Backend, MemoryBackend};
use crate::error::{KvLockError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Memory backend whose operations can be switched to fail.
#[derive(Default)]
pub(crate) struct FlakyBackend {
    pub(crate) inner: MemoryBackend,
    pub(crate) fail_add: AtomicBool,
    pub(crate) fail_delete: AtomicBool,
    pub(crate) fail_read: AtomicBool,
    pub(crate) add_calls: AtomicUsize,
    pub(crate) delete_calls: AtomicUsize,
}

impl FlakyBackend {
    pub(crate) fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

fn injected(op: &str) -> KvLockError {
    KvLockError::BackendError(format!("injected {} failure", op))
}

impl Backend for FlakyBackend {
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(injected("add"));
        }
        self.inner.add_if_absent(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        self.inner.delete(key)
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_read.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        self.inner.read(key)
    }
}
