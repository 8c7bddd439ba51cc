//! Cooperative cancellation.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation token polled by the evaluation loop between episodes.
///
/// Clones share one flag, so a signal handler or another thread can request a
/// stop while the loop runs. Stopping is cooperative: an in-flight episode
/// always runs to completion, only the next one is skipped.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the evaluation loop to stop after the in-flight episode.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let flag = StopFlag::new();
        let other = flag.clone();
        assert!(!flag.is_set());
        other.request_stop();
        assert!(flag.is_set());
    }
}
