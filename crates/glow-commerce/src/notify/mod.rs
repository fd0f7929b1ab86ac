//! Store change notification.
//!
//! The catalog store publishes a [`ChangeEvent`] after every successful
//! write. Catalog views subscribe to it and additionally poll on a timer to
//! pick up writes made by other processes sharing the same data directory.

mod view;

pub use view::CatalogView;

use tokio::sync::broadcast;

use crate::catalog::Category;
use crate::ids::ProductId;

/// Pending events kept per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A record was appended to a category.
    Appended { category: Category, id: ProductId },
    /// Every storefront category was cleared.
    Cleared,
    /// The subscriber fell behind and missed some events.
    Resync,
}

/// Broadcasts store changes to any number of subscribers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Start listening. Dropping the subscription unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Publish an event, returning how many subscribers received it.
    pub fn notify(&self, event: ChangeEvent) -> usize {
        let delivered = self.tx.send(event.clone()).unwrap_or(0);
        tracing::debug!(?event, delivered, "store change published");
        delivered
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription to store changes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Wait for the next change.
    ///
    /// Returns `None` once the notifier is gone.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        match self.rx.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "change subscriber lagged");
                Some(ChangeEvent::Resync)
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Stop listening.
    pub fn unsubscribe(self) {}
}
