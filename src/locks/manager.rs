//! Lock manager: acquisition loop and per-instance ownership bookkeeping.

use super::guard::LockGuard;
use super::mode::AcquireMode;
use super::record::LockRecord;
use crate::backend::Backend;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default sleep between acquisition attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest sleep between attempts; shorter intervals are raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Outcome of a single acquisition attempt.
enum Attempt {
    Acquired,
    /// This instance already holds the name; retrying cannot help.
    AlreadyOwned,
    Contended,
}

/// Named-lock client over a shared [`Backend`].
///
/// Each instance tracks the names it acquired in an ownership set. Only names
/// in that set can be released through this instance, and everything still in
/// it is released when the instance is dropped.
///
/// Cloning yields a fresh instance with an **empty** ownership set that shares
/// the same backend. Held locks are never duplicated, so dropping a clone
/// cannot release locks the original still holds.
///
/// All operations report contention, backend failures, and misuse as `false`.
pub struct LockManager<B: Backend + ?Sized> {
    backend: Arc<B>,
    owned: Mutex<HashSet<String>>,
    poll_interval: Duration,
    instance: u64,
}

impl<B: Backend + ?Sized> LockManager<B> {
    /// Create a manager with an empty ownership set.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            owned: Mutex::new(HashSet::new()),
            poll_interval: DEFAULT_POLL_INTERVAL,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Set the sleep between attempts for blocking and bounded acquisition.
    ///
    /// Values below [`MIN_POLL_INTERVAL`] (including zero) are clamped to it.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Process-unique id of this instance, recorded in every lock it writes.
    pub fn instance_id(&self) -> u64 {
        self.instance
    }

    /// Acquire `name` according to `mode`.
    ///
    /// Returns `false` if the name is already held by this instance (locks are
    /// not re-entrant), if it stays held elsewhere for the whole wait, or if
    /// the backend keeps failing.
    pub fn acquire(&self, name: &str, mode: AcquireMode) -> bool {
        let start = Instant::now();

        loop {
            match self.try_acquire(name) {
                Attempt::Acquired => {
                    debug!(
                        lock = %name,
                        instance = self.instance,
                        waited_ms = start.elapsed().as_millis() as u64,
                        "Lock acquired"
                    );
                    return true;
                }
                Attempt::AlreadyOwned => {
                    debug!(lock = %name, instance = self.instance, "Lock already held by this instance");
                    return false;
                }
                Attempt::Contended => {}
            }

            let sleep_for = match mode {
                AcquireMode::NonBlocking => return false,
                AcquireMode::Blocking => self.poll_interval,
                AcquireMode::Bounded(timeout) => {
                    let remaining = timeout.saturating_sub(start.elapsed());
                    if remaining.is_zero() {
                        debug!(
                            lock = %name,
                            instance = self.instance,
                            timeout_ms = timeout.as_millis() as u64,
                            "Lock wait timed out"
                        );
                        return false;
                    }
                    remaining.min(self.poll_interval)
                }
            };

            thread::sleep(sleep_for);
        }
    }

    /// Acquire `name` and wrap it in a guard that releases it on drop.
    pub fn acquire_guard(&self, name: &str, mode: AcquireMode) -> Option<LockGuard<'_, B>> {
        self.acquire(name, mode)
            .then(|| LockGuard::new(self, name.to_string()))
    }

    /// Release `name` if this instance holds it.
    ///
    /// Never touches the backend for names this instance does not own. If the
    /// backend delete fails, the name stays owned so the caller can retry.
    pub fn release(&self, name: &str) -> bool {
        // Claim the release under the set lock so concurrent callers on this
        // instance cannot both delete the key.
        if !self.owned().remove(name) {
            debug!(lock = %name, instance = self.instance, "Release refused: lock not owned by this instance");
            return false;
        }

        let deleted = match self.backend.delete(name) {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(lock = %name, instance = self.instance, error = %e, "Backend delete failed");
                false
            }
        };

        if deleted {
            debug!(lock = %name, instance = self.instance, "Lock released");
        } else {
            self.owned().insert(name.to_string());
            warn!(lock = %name, instance = self.instance, "Lock still owned: backend did not delete it");
        }
        deleted
    }

    /// Whether `name` is held by anyone, according to the backend.
    pub fn is_locked(&self, name: &str) -> bool {
        match self.backend.read(name) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(lock = %name, error = %e, "Backend read failed");
                false
            }
        }
    }

    /// Whether this instance holds `name`.
    pub fn owns(&self, name: &str) -> bool {
        self.owned().contains(name)
    }

    /// Names held by this instance, sorted.
    pub fn owned_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.owned().iter().cloned().collect();
        names.sort();
        names
    }

    /// Release every name this instance holds; returns how many were released.
    pub fn release_all(&self) -> usize {
        self.owned_names()
            .iter()
            .filter(|name| self.release(name))
            .count()
    }

    fn try_acquire(&self, name: &str) -> Attempt {
        if self.owns(name) {
            return Attempt::AlreadyOwned;
        }

        let payload = LockRecord::new(self.instance)
            .to_json()
            .map(String::into_bytes)
            .unwrap_or_default();

        match self.backend.add_if_absent(name, &payload) {
            Ok(true) => {
                self.owned().insert(name.to_string());
                Attempt::Acquired
            }
            Ok(false) => Attempt::Contended,
            Err(e) => {
                warn!(lock = %name, instance = self.instance, error = %e, "Backend add failed");
                Attempt::Contended
            }
        }
    }

    fn owned(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked mid-call.
        self.owned.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<B: Backend + ?Sized> Clone for LockManager<B> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.backend)).with_poll_interval(self.poll_interval)
    }
}

impl<B: Backend + ?Sized> Drop for LockManager<B> {
    fn drop(&mut self) {
        for name in self.owned_names() {
            if !self.release(&name) {
                warn!(lock = %name, instance = self.instance, "Failed to release lock on drop");
            }
        }
    }
}

impl<B: Backend + ?Sized> fmt::Debug for LockManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockManager")
            .field("instance", &self.instance)
            .field("poll_interval", &self.poll_interval)
            .field("owned", &self.owned_names())
            .finish()
    }
}
