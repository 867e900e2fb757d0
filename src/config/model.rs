//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the kvlock CLI.
///
/// This struct represents the contents of `kvlock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one file per held lock (default: ".kvlock/locks").
    /// Every cooperating process must point at the same directory.
    #[serde(default = "default_lock_dir")]
    pub lock_dir: PathBuf,

    /// Milliseconds to sleep between attempts while waiting for a lock.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Minutes after which `list` flags a lock as stale.
    #[serde(default = "default_stale_minutes")]
    pub stale_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_dir: default_lock_dir(),
            poll_interval_ms: default_poll_interval_ms(),
            stale_minutes: default_stale_minutes(),
        }
    }
}
