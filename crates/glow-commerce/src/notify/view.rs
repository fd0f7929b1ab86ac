//! Live catalog views.

use std::sync::Arc;
use std::time::Duration;

use glow_store::KvStore;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::catalog::{CatalogStore, CategorySelector, ProductRecord};
use crate::error::CommerceError;
use crate::notify::Subscription;
use crate::search::FilterState;

/// A category listing kept up to date in the background.
///
/// The listing is refetched when the store publishes a change, when the poll
/// interval elapses, and when [`CatalogView::refresh`] is called. Dropping
/// the view stops the background task and its subscription.
#[derive(Debug)]
pub struct CatalogView {
    selector: CategorySelector,
    products: watch::Receiver<Vec<ProductRecord>>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl CatalogView {
    /// Start a view over `selector`. Must be called from within a tokio runtime.
    ///
    /// Fails with [`CommerceError::Validation`] when `poll_interval` is zero.
    pub fn spawn<S>(
        catalog: Arc<CatalogStore<S>>,
        selector: CategorySelector,
        poll_interval: Duration,
    ) -> Result<Self, CommerceError>
    where
        S: KvStore + 'static,
    {
        if poll_interval.is_zero() {
            return Err(CommerceError::Validation(
                "poll interval must be greater than zero".to_string(),
            ));
        }

        let subscription = catalog.subscribe();
        let initial = catalog.list_by_category(selector).unwrap_or_else(|e| {
            tracing::warn!(%selector, error = %e, "initial catalog load failed");
            Vec::new()
        });
        let (tx, products) = watch::channel(initial);
        let refresh = Arc::new(Notify::new());

        let task = tokio::spawn(run(
            catalog,
            subscription,
            selector,
            poll_interval,
            tx,
            Arc::clone(&refresh),
        ));

        Ok(Self {
            selector,
            products,
            refresh,
            task,
        })
    }

    pub fn selector(&self) -> CategorySelector {
        self.selector
    }

    /// Current listing in store order.
    pub fn products(&self) -> Vec<ProductRecord> {
        self.products.borrow().clone()
    }

    /// Current listing run through the filter/sort pipeline.
    pub fn filtered(&self, state: &FilterState) -> Vec<ProductRecord> {
        state.apply(&self.products.borrow())
    }

    /// Wait until the listing changes. Returns `false` if the view stopped.
    pub async fn changed(&mut self) -> bool {
        self.products.changed().await.is_ok()
    }

    /// Ask for an immediate refetch.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop the background task and wait for it to finish.
    pub async fn close(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for CatalogView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<S: KvStore>(
    catalog: Arc<CatalogStore<S>>,
    mut subscription: Subscription,
    selector: CategorySelector,
    poll_interval: Duration,
    tx: watch::Sender<Vec<ProductRecord>>,
    refresh: Arc<Notify>,
) {
    let mut ticker = time::interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::trace!(%selector, "poll refresh");
            }
            event = subscription.recv() => match event {
                Some(event) => tracing::debug!(%selector, ?event, "change refresh"),
                None => break,
            },
            () = refresh.notified() => {
                tracing::debug!(%selector, "manual refresh");
            }
        }

        match catalog.list_by_category(selector) {
            Ok(records) => {
                tx.send_if_modified(|current| {
                    if *current == records {
                        false
                    } else {
                        *current = records;
                        true
                    }
                });
            }
            Err(e) => tracing::warn!(%selector, error = %e, "catalog refresh failed"),
        }
    }
}
