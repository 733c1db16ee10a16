//! Remote document store abstraction.
//!
//! The store is push-based: a subscriber registers a [`RecentQuery`] and
//! receives the full query result every time it changes, starting with the
//! current result. Writes append a record under a store-assigned id.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::DomainError;

/// A record as delivered by a live query.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Store-assigned record identifier.
    pub id: String,
    /// Raw record payload.
    pub value: serde_json::Value,
}

/// The result of a live query at one point in time, in ascending query
/// order. `None` is a null snapshot (nothing stored under the collection).
pub type Snapshot = Option<Vec<StoredRecord>>;

/// One emission of a live query.
pub type SnapshotResult = Result<Snapshot, DomainError>;

/// A bounded, ordered query over the most recent records of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentQuery {
    /// The collection to watch.
    pub collection: String,
    /// The child field records are ordered by.
    pub order_by: String,
    /// Only the last `limit` records in order are returned.
    pub limit: usize,
}

impl RecentQuery {
    /// Creates a new query.
    #[must_use]
    pub fn new(collection: impl Into<String>, order_by: impl Into<String>, limit: usize) -> Self {
        Self {
            collection: collection.into(),
            order_by: order_by.into(),
            limit,
        }
    }
}

/// Store-side half of a live query.
#[derive(Debug, Clone)]
pub struct LiveQuerySender(mpsc::UnboundedSender<SnapshotResult>);

impl LiveQuerySender {
    /// Emits an update. Returns `false` once the subscriber has detached.
    pub fn send(&self, update: SnapshotResult) -> bool {
        self.0.send(update).is_ok()
    }

    /// Returns `true` once the subscriber has detached.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// Subscriber-side half of a live query. Dropping it detaches the query.
#[derive(Debug)]
pub struct LiveQuery(mpsc::UnboundedReceiver<SnapshotResult>);

impl LiveQuery {
    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn channel() -> (LiveQuerySender, LiveQuery) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LiveQuerySender(tx), LiveQuery(rx))
    }

    /// Waits for the next emission. Returns `None` once the store side is
    /// gone.
    pub async fn next(&mut self) -> Option<SnapshotResult> {
        self.0.recv().await
    }
}

/// Capability interface over a push-based document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Opens a live query. The current result is emitted first, followed by
    /// one emission per change, in the order the store produces them.
    fn watch(&self, query: RecentQuery) -> LiveQuery;

    /// Appends `value` to `collection` and returns the id the store
    /// assigned to it.
    async fn push(&self, collection: &str, value: serde_json::Value)
    -> Result<String, DomainError>;
}
