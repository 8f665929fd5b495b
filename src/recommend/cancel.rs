// Cooperative cancellation for recommendation requests.
//
// The vectorizer and ranker are synchronous loops over the whole catalog.
// They poll a `Cancellation` every `CHECK_INTERVAL` items and bail out with
// `Cancelled` once the flag is raised or the deadline has passed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How many items a loop processes between cancellation checks.
pub const CHECK_INTERVAL: usize = 256;

/// The computation was cancelled or ran past its deadline.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Recommendation computation was cancelled")]
pub struct Cancelled;

/// A cancellation handle. Clones share the same flag, so a caller can keep
/// one clone and trip it while another clone travels with the request.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A handle that only trips when `cancel()` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that also trips once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Err(Cancelled)` if the handle has tripped.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_handle_is_not_cancelled() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert_eq!(cancel.check(), Ok(()));
    }

    #[test]
    fn test_clones_share_the_flag() {
        let cancel = Cancellation::new();
        let other = cancel.clone();
        other.cancel();
        assert!(cancel.is_cancelled());
        assert_eq!(cancel.check(), Err(Cancelled));
    }

    #[test]
    fn test_zero_timeout_trips_immediately() {
        let cancel = Cancellation::with_timeout(Duration::ZERO);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_long_timeout_does_not_trip() {
        let cancel = Cancellation::with_timeout(Duration::from_secs(3600));
        assert!(!cancel.is_cancelled());
    }
}
