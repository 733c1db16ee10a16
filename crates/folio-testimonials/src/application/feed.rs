//! Live testimonial feed.
//!
//! Subscribes to the store's recent-testimonials query and hands every
//! emission to the subscriber as a complete, most-recent-first replacement
//! sequence.

use std::sync::{Arc, Mutex};

use folio_core::store::{DocumentStore, RecentQuery, Snapshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::lock;
use crate::domain::testimonial::{COLLECTION, FEED_LIMIT, ORDER_BY, Testimonial, TestimonialRecord};

type Handler = Box<dyn FnMut(Vec<Testimonial>) + Send>;

/// The query the feed mirrors: the last [`FEED_LIMIT`] testimonials by
/// creation time.
#[must_use]
pub fn feed_query() -> RecentQuery {
    RecentQuery::new(COLLECTION, ORDER_BY, FEED_LIMIT)
}

/// Projects a store snapshot into testimonials, most recent first.
///
/// A null snapshot yields an empty feed. Records that do not parse as a
/// testimonial are skipped.
#[must_use]
pub fn project_snapshot(snapshot: Snapshot) -> Vec<Testimonial> {
    let Some(records) = snapshot else {
        return Vec::new();
    };
    records
        .into_iter()
        .rev()
        .filter_map(
            |record| match serde_json::from_value::<TestimonialRecord>(record.value) {
                Ok(value) => Some(Testimonial::from_record(record.id, value)),
                Err(error) => {
                    warn!(id = %record.id, %error, "skipping malformed testimonial");
                    None
                }
            },
        )
        .collect()
}

/// Opens live subscriptions to the testimonial feed.
#[derive(Clone)]
pub struct FeedController {
    store: Arc<dyn DocumentStore>,
}

impl FeedController {
    /// Creates a controller reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Subscribes `on_update` to the feed. It is called once per store
    /// emission, in emission order, with the full feed. Read failures are
    /// logged and produce no call.
    ///
    /// `on_update` runs while the subscription's lock is held and must not
    /// call back into the returned handle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<F>(&self, on_update: F) -> FeedSubscription
    where
        F: FnMut(Vec<Testimonial>) + Send + 'static,
    {
        let boxed: Handler = Box::new(on_update);
        let handler = Arc::new(Mutex::new(Some(boxed)));
        let mut live = self.store.watch(feed_query());

        let task_handler = Arc::clone(&handler);
        let task = tokio::spawn(async move {
            while let Some(update) = live.next().await {
                match update {
                    Ok(snapshot) => {
                        let items = project_snapshot(snapshot);
                        let mut guard = lock(&task_handler);
                        let Some(handler) = guard.as_mut() else {
                            break;
                        };
                        debug!(count = items.len(), "testimonial feed updated");
                        handler(items);
                    }
                    Err(error) => warn!(%error, "testimonial feed read failed"),
                }
            }
            debug!("testimonial feed closed");
        });

        FeedSubscription { handler, task }
    }
}

/// Handle to a live feed subscription. Dropping it unsubscribes.
pub struct FeedSubscription {
    handler: Arc<Mutex<Option<Handler>>>,
    task: JoinHandle<()>,
}

impl FeedSubscription {
    /// Detaches from the feed. Once this returns no further update is
    /// delivered, and any delivery already in progress has finished.
    /// Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        let previous = lock(&self.handler).take();
        self.task.abort();
        if previous.is_some() {
            debug!("testimonial feed unsubscribed");
        }
    }

    /// Returns `true` until [`FeedSubscription::unsubscribe`] is called or
    /// the store closes the query.
    #[must_use]
    pub fn is_active(&self) -> bool {
        lock(&self.handler).is_some() && !self.task.is_finished()
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
