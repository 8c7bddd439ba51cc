//! Process-wide backend runtime.
use crate::backend::ModelFormat;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static BACKEND_INIT: Once = Once::new();

/// Handle to the process-wide state of the loading backends.
///
/// Some backend families need one-time process-wide preparation before any
/// artifact can be decoded. [`BackendRuntime::init`] performs it on first use
/// and is a no-op on every later call in the same process, whichever backend
/// asks. [`BackendRuntime::shutdown`] tears the handle down exactly once;
/// repeated calls, and the drop that follows an explicit shutdown, do
/// nothing.
pub struct BackendRuntime {
    family: ModelFormat,
    down: AtomicBool,
}

impl BackendRuntime {
    /// Prepares process-wide backend state and returns the handle.
    ///
    /// Idempotent within a process: only the first call does the
    /// preparation.
    pub fn init(family: ModelFormat) -> Self {
        BACKEND_INIT.call_once(|| {
            info!("backend runtime prepared for {} models", family.name());
        });
        Self {
            family,
            down: AtomicBool::new(false),
        }
    }

    /// The backend family this handle was initialized for.
    pub fn family(&self) -> ModelFormat {
        self.family
    }

    /// Tears the runtime down.
    ///
    /// Returns `true` when this call performed the teardown, `false` when it
    /// had already happened.
    pub fn shutdown(&self) -> bool {
        if self.down.swap(true, Ordering::SeqCst) {
            return false;
        }
        info!("backend runtime shut down");
        true
    }
}

impl Drop for BackendRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let a = BackendRuntime::init(ModelFormat::Archive);
        let b = BackendRuntime::init(ModelFormat::Checkpoint);
        assert_eq!(a.family(), ModelFormat::Archive);
        assert_eq!(b.family(), ModelFormat::Checkpoint);
    }

    #[test]
    fn shutdown_runs_exactly_once() {
        let rt = BackendRuntime::init(ModelFormat::Archive);
        assert!(rt.shutdown());
        assert!(!rt.shutdown());
    }
}
