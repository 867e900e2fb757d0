//! Operator-facing lock inspection: listing and forced clearing.
//!
//! These bypass the ownership rules of [`LockManager`](super::LockManager) on
//! purpose; they are for cleaning up after holders that crashed.

use super::record::LockRecord;
use crate::backend::{Backend, FileBackend, StoredLock};
use crate::error::{KvLockError, Result};
use std::fmt;
use std::path::PathBuf;

/// Information about a lock present in the backend.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// The lock name.
    pub name: String,

    /// The lock file path.
    pub path: PathBuf,

    /// The holder's record, if the payload could be parsed.
    pub record: Option<LockRecord>,

    /// Whether the lock is older than the stale threshold.
    pub is_stale: bool,
}

impl LockInfo {
    fn from_stored(stored: StoredLock, stale_minutes: u32) -> Self {
        let record = LockRecord::from_slice(&stored.payload).ok();
        let is_stale = record
            .as_ref()
            .is_some_and(|r| r.is_stale(stale_minutes));

        Self {
            name: stored.name,
            path: stored.path,
            record,
            is_stale,
        }
    }
}

impl fmt::Display for LockInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) => write!(
                f,
                "{} (owner: {}, age: {}{})",
                self.name,
                record.owner,
                record.age_string(),
                if self.is_stale { ", STALE" } else { "" }
            ),
            None => write!(f, "{} (owner: unknown)", self.name),
        }
    }
}

/// List all locks present in the directory backend.
pub fn list_locks(backend: &FileBackend, stale_minutes: u32) -> Result<Vec<LockInfo>> {
    Ok(backend
        .list()?
        .into_iter()
        .map(|stored| LockInfo::from_stored(stored, stale_minutes))
        .collect())
}

/// Forcibly remove a lock regardless of who holds it.
///
/// The caller is responsible for checking that clearing is appropriate.
///
/// # Returns
///
/// * `Ok(LockInfo)` - Information about the cleared lock (for audit output)
/// * `Err(KvLockError::UserError)` - The lock does not exist
pub fn clear_lock(backend: &FileBackend, name: &str, stale_minutes: u32) -> Result<LockInfo> {
    let payload = backend.read(name)?.ok_or_else(|| {
        KvLockError::UserError(format!(
            "lock '{}' does not exist at: {}",
            name,
            backend.path_for(name).display()
        ))
    })?;

    let info = LockInfo::from_stored(
        StoredLock {
            name: name.to_string(),
            path: backend.path_for(name),
            payload,
        },
        stale_minutes,
    );

    if !backend.delete(name)? {
        return Err(KvLockError::UserError(format!(
            "lock '{}' was released while clearing",
            name
        )));
    }

    Ok(info)
}
