//! Exit code constants for the kvlock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, refused operation)
//! - 2: Configuration error
//! - 3: Backend failure (lock directory unreadable, I/O errors)
//! - 4: Lock could not be acquired

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an operation refused for safety.
pub const USER_ERROR: i32 = 1;

/// Configuration file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 2;

/// Backend failure: the store rejected or failed an operation.
pub const BACKEND_FAILURE: i32 = 3;

/// Lock acquisition failure: the named lock is held elsewhere.
pub const LOCK_FAILURE: i32 = 4;
