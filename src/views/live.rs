//! Live result sets fed by backend subscriptions.

use tokio::sync::watch;

use crate::backend::ports::Subscription;

/// Latest snapshot of a subscribed query.
///
/// Owns the backend subscription: dropping the collection unregisters it,
/// after which [`LiveCollection::changes`] receivers observe a closed
/// channel.
#[derive(Debug)]
pub struct LiveCollection<T> {
    receiver: watch::Receiver<Vec<T>>,
    subscription: Subscription,
}

impl<T> LiveCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Opens a collection by handing a snapshot publisher to `subscribe`.
    ///
    /// `subscribe` registers a listener that forwards each snapshot to the
    /// publisher and returns the resulting subscription.
    ///
    /// # Errors
    ///
    /// Returns whatever `subscribe` returns on failure.
    pub fn open<E>(
        subscribe: impl FnOnce(SnapshotPublisher<T>) -> Result<Subscription, E>,
    ) -> Result<Self, E> {
        let (sender, receiver) = watch::channel(Vec::new());
        let subscription = subscribe(SnapshotPublisher { sender })?;
        Ok(Self {
            receiver,
            subscription,
        })
    }

    /// Returns a copy of the latest snapshot.
    #[must_use]
    pub fn current(&self) -> Vec<T> {
        self.receiver.borrow().clone()
    }

    /// Returns a receiver that is notified on every new snapshot.
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<Vec<T>> {
        self.receiver.clone()
    }

    /// Returns `true` while the backend subscription is registered.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.subscription.is_active()
    }
}

/// Sending half handed to a subscription listener.
#[derive(Debug)]
pub struct SnapshotPublisher<T> {
    sender: watch::Sender<Vec<T>>,
}

impl<T> SnapshotPublisher<T> {
    /// Replaces the current snapshot and wakes every receiver.
    pub fn publish(&self, snapshot: Vec<T>) {
        self.sender.send_replace(snapshot);
    }
}
