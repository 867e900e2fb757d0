//! kvlock: named mutual exclusion over any store with an atomic
//! add-if-absent primitive.
//!
//! ```
//! use kvlock::backend::MemoryBackend;
//! use kvlock::locks::{AcquireMode, LockManager};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let manager = LockManager::new(Arc::clone(&backend));
//!
//! assert!(manager.acquire("nightly-report", AcquireMode::NonBlocking));
//! assert!(manager.is_locked("nightly-report"));
//! assert!(manager.release("nightly-report"));
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod locks;

mod commands;

pub use commands::dispatch;

#[cfg(test)]
mod test_support;
