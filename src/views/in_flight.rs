//! Busy flag guarding a form against re-submission.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared "saving" / "importing" flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl InFlight {
    /// Creates an idle flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the flag busy, or returns `None` when it already is.
    #[must_use]
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
