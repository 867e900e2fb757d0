//! Runtime context resolution for kvlock commands.
//!
//! Combines the config file with command-line overrides and hands out the
//! backend and lock manager every command works against. All commands go
//! through this module so they agree on which lock directory they use.

use crate::backend::FileBackend;
use crate::config::Config;
use crate::error::Result;
use crate::locks::LockManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolved settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct LockContext {
    /// Effective configuration (file values plus overrides).
    pub config: Config,

    /// Directory holding lock files.
    pub lock_dir: PathBuf,
}

impl LockContext {
    /// Resolve the context from an optional config path and lock dir override.
    pub fn resolve(config_path: Option<&Path>, lock_dir: Option<&Path>) -> Result<Self> {
        let config = Config::resolve(config_path)?;
        Ok(Self::from_config(config, lock_dir))
    }

    /// Build a context from an already loaded config.
    pub fn from_config(mut config: Config, lock_dir: Option<&Path>) -> Self {
        if let Some(dir) = lock_dir {
            config.lock_dir = dir.to_path_buf();
        }
        let lock_dir = config.lock_dir.clone();
        Self { config, lock_dir }
    }

    /// Backend over the lock directory.
    pub fn backend(&self) -> FileBackend {
        FileBackend::new(&self.lock_dir)
    }

    /// Fresh lock manager using the configured poll interval.
    pub fn manager(&self) -> LockManager<FileBackend> {
        LockManager::new(Arc::new(self.backend())).with_poll_interval(self.config.poll_interval())
    }
}
