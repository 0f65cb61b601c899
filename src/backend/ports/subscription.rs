//! Handle for a standing listener registration.

use std::fmt;

type Cancel = Box<dyn FnOnce() + Send + Sync>;

/// Registration handle returned by live subscriptions.
///
/// The listener stays registered until [`Subscription::unsubscribe`] is
/// called or the handle is dropped.
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    cancel: Option<Cancel>,
}

impl Subscription {
    /// Wraps the closure that unregisters the listener.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to unregister, used when the backend is
    /// not configured.
    pub const fn inert() -> Self {
        Self { cancel: None }
    }

    /// Returns `true` when this handle still owns a registration.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Unregisters the listener now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
