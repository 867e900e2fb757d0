//! Diagnostic record stored as the value of a held lock.

use crate::error::{KvLockError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Metadata written into the backend when a lock is acquired.
///
/// The lock manager never reads it back; presence of the key is all that
/// matters for mutual exclusion. It exists so operators can see who holds
/// a lock and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Lock manager instance within the holding process.
    pub instance: u64,

    /// Timestamp when the lock was acquired (RFC3339).
    pub created_at: DateTime<Utc>,
}

impl LockRecord {
    /// Create a record for the given manager instance with the current timestamp.
    pub fn new(instance: u64) -> Self {
        Self {
            owner: get_owner_string(),
            pid: Some(std::process::id()),
            instance,
            created_at: Utc::now(),
        }
    }

    /// Parse a record from a raw backend payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| KvLockError::BackendError(format!("failed to parse lock record: {}", e)))
    }

    /// Serialize the record to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            KvLockError::BackendError(format!("failed to serialize lock record: {}", e))
        })
    }

    /// Calculate the age of the lock.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds.max(0))
        }
    }

    /// Check if the lock is older than `stale_minutes`.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.age().num_minutes() > stale_minutes as i64
    }
}

/// Owner string for lock records: `user@host`.
pub(crate) fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
