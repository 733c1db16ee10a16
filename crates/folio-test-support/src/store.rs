//! Test stores: mock `DocumentStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use folio_core::error::DomainError;
use folio_core::store::{
    DocumentStore, LiveQuery, LiveQuerySender, RecentQuery, SnapshotResult, StoredRecord,
};
use serde_json::{Value, json};

/// A store whose live queries are driven by the test. Records every `watch`
/// and `push` call; `push` always succeeds with ids `rec-1`, `rec-2`, ...
///
/// `watch` emits nothing on its own. Call [`ScriptedStore::emit`] to push a
/// snapshot to every attached live query.
#[derive(Debug, Default)]
pub struct ScriptedStore {
    senders: Mutex<Vec<LiveQuerySender>>,
    queries: Mutex<Vec<RecentQuery>>,
    pushed: Mutex<Vec<(String, Value)>>,
}

impl ScriptedStore {
    /// Creates a store with no attached queries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `update` to every attached live query and returns how many
    /// received it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn emit(&self, update: &SnapshotResult) -> usize {
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|sender| sender.send(update.clone()));
        senders.len()
    }

    /// Returns the number of live queries still attached.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attached(&self) -> usize {
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|sender| !sender.is_closed());
        senders.len()
    }

    /// Returns every query passed to `watch`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn watched_queries(&self) -> Vec<RecentQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Returns every `(collection, value)` pair passed to `push`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pushed(&self) -> Vec<(String, Value)> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    fn watch(&self, query: RecentQuery) -> LiveQuery {
        let (sender, live_query) = LiveQuery::channel();
        self.queries.lock().unwrap().push(query);
        self.senders.lock().unwrap().push(sender);
        live_query
    }

    async fn push(&self, collection: &str, value: Value) -> Result<String, DomainError> {
        let mut pushed = self.pushed.lock().unwrap();
        pushed.push((collection.to_owned(), value));
        Ok(format!("rec-{}", pushed.len()))
    }
}

/// A store that always fails. Every live query emits one read error and then
/// closes; every push returns a write error.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    fn watch(&self, _query: RecentQuery) -> LiveQuery {
        let (sender, live_query) = LiveQuery::channel();
        sender.send(Err(DomainError::StoreRead("connection refused".into())));
        live_query
    }

    async fn push(&self, _collection: &str, _value: Value) -> Result<String, DomainError> {
        Err(DomainError::StoreWrite("connection refused".into()))
    }
}

/// Builds a stored testimonial record with fixed role, rating, text and
/// avatar.
#[must_use]
pub fn testimonial_record(id: &str, author: &str, created_at: &str) -> StoredRecord {
    StoredRecord {
        id: id.to_owned(),
        value: json!({
            "author": author,
            "role": "Engineer",
            "rating": 5,
            "text": format!("Review from {author}"),
            "avatar": "/placeholder-user.jpg",
            "createdAt": created_at,
        }),
    }
}
