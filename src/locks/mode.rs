//! How long `acquire` is willing to wait.

use std::time::Duration;

/// Acquisition mode for [`LockManager::acquire`](super::LockManager::acquire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquireMode {
    /// Try exactly once and return immediately.
    #[default]
    NonBlocking,
    /// Retry until the lock is acquired, with no time limit.
    Blocking,
    /// Retry until acquired or until the duration has elapsed since the call began.
    Bounded(Duration),
}

impl AcquireMode {
    /// Map an optional timeout onto a mode.
    ///
    /// `None` waits forever, a zero duration tries once, anything else is a
    /// bounded wait.
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            None => AcquireMode::Blocking,
            Some(t) if t.is_zero() => AcquireMode::NonBlocking,
            Some(t) => AcquireMode::Bounded(t),
        }
    }

    /// Bounded wait of `millis` milliseconds; zero is non-blocking.
    pub fn from_millis(millis: u64) -> Self {
        Self::from_timeout(Some(Duration::from_millis(millis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_none_blocks() {
        assert_eq!(AcquireMode::from_timeout(None), AcquireMode::Blocking);
    }

    #[test]
    fn zero_timeout_is_non_blocking() {
        assert_eq!(
            AcquireMode::from_timeout(Some(Duration::ZERO)),
            AcquireMode::NonBlocking
        );
        assert_eq!(AcquireMode::from_millis(0), AcquireMode::NonBlocking);
    }

    #[test]
    fn positive_timeout_is_bounded() {
        assert_eq!(
            AcquireMode::from_millis(250),
            AcquireMode::Bounded(Duration::from_millis(250))
        );
    }
}
