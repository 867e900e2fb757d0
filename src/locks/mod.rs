//! Named distributed locks over an atomic key-value backend.
//!
//! # Protocol
//!
//! A lock is held by whoever managed to `add_if_absent` its name into the
//! backend. Waiting is a fixed-interval poll: the backend offers no change
//! notifications, only point-in-time existence.
//!
//! # Ownership
//!
//! Each [`LockManager`] keeps a private set of the names it acquired. Only
//! those names can be released through it, which stops one client from
//! deleting a lock someone else holds. The set is never shared, serialized,
//! or inferred from backend content.
//!
//! # Cleanup
//!
//! Dropping a manager releases everything it still holds. This bounds
//! leakage to abnormal termination; there is no lease or TTL expiry.

mod guard;
mod inspect;
mod manager;
mod mode;
mod record;


pub use guard::LockGuard;
pub use inspect::{LockInfo, clear_lock, list_locks};
pub use manager::{DEFAULT_POLL_INTERVAL, LockManager, MIN_POLL_INTERVAL};
pub use mode::AcquireMode;
pub use record::LockRecord;
