//! Error types for kvlock.
//!
//! Lock contention is never an error: the lock manager reports it as a
//! boolean. These variants cover configuration, backend I/O, and CLI usage.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kvlock operations.
#[derive(Error, Debug)]
pub enum KvLockError {
    /// User provided invalid arguments or asked for a refused operation.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The backing store failed an operation.
    #[error("Backend operation failed: {0}")]
    BackendError(String),

    /// Lock could not be acquired.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),
}

impl KvLockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KvLockError::UserError(_) => exit_codes::USER_ERROR,
            KvLockError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            KvLockError::BackendError(_) => exit_codes::BACKEND_FAILURE,
            KvLockError::LockError(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for kvlock operations.
pub type Result<T> = std::result::Result<T, KvLockError>;
