//! Configuration constants and default value functions.

use std::path::PathBuf;

/// Config file picked up from the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "kvlock.yaml";

// Default value functions for serde
pub(crate) fn default_lock_dir() -> PathBuf {
    PathBuf::from(".kvlock/locks")
}
pub(crate) fn default_poll_interval_ms() -> u64 {
    100
}
pub(crate) fn default_stale_minutes() -> u32 {
    120
}
