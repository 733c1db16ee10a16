//! In-memory implementation of the `DocumentStore` trait.
//!
//! Records live in per-collection vectors. Every registered live query is
//! re-evaluated and re-emitted after each append to its collection, which
//! mirrors how a realtime database pushes whole query results to listeners.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use folio_core::error::DomainError;
use folio_core::store::{
    DocumentStore, LiveQuery, LiveQuerySender, RecentQuery, Snapshot, StoredRecord,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// A registered live query.
#[derive(Debug)]
struct Watcher {
    query: RecentQuery,
    sender: LiveQuerySender,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<StoredRecord>>,
    watchers: Vec<Watcher>,
}

/// Process-local realtime document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value` under a caller-chosen id and notifies watchers of the
    /// collection. An existing record with the same id is replaced.
    pub fn insert(&self, collection: &str, id: impl Into<String>, value: Value) {
        let id = id.into();
        let mut inner = self.lock();
        let records = inner.collections.entry(collection.to_owned()).or_default();
        records.retain(|record| record.id != id);
        records.push(StoredRecord { id, value });
        notify(&mut inner, collection);
    }

    /// Returns every record of `collection` in insertion order.
    #[must_use]
    pub fn records(&self, collection: &str) -> Vec<StoredRecord> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of live queries that are still attached.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        let mut inner = self.lock();
        inner.watchers.retain(|watcher| !watcher.sender.is_closed());
        inner.watchers.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn watch(&self, query: RecentQuery) -> LiveQuery {
        let (sender, live_query) = LiveQuery::channel();
        let mut inner = self.lock();
        let initial = inner
            .collections
            .get(&query.collection)
            .and_then(|records| evaluate(records, &query));
        sender.send(Ok(initial));
        debug!(collection = %query.collection, limit = query.limit, "live query attached");
        inner.watchers.push(Watcher { query, sender });
        live_query
    }

    async fn push(&self, collection: &str, value: Value) -> Result<String, DomainError> {
        let id = Uuid::now_v7().simple().to_string();
        self.insert(collection, id.clone(), value);
        debug!(collection, %id, "record appended");
        Ok(id)
    }
}

/// Re-emits every live query on `collection`, dropping detached watchers.
fn notify(inner: &mut Inner, collection: &str) {
    let Inner {
        collections,
        watchers,
    } = inner;
    let records = collections.get(collection).map_or(&[][..], Vec::as_slice);
    watchers.retain(|watcher| {
        if watcher.query.collection != collection {
            return !watcher.sender.is_closed();
        }
        watcher.sender.send(Ok(evaluate(records, &watcher.query)))
    });
}

/// Orders `records` by the query's child field ascending and keeps the last
/// `limit` of them. An empty result is a null snapshot.
fn evaluate(records: &[StoredRecord], query: &RecentQuery) -> Snapshot {
    let mut ordered: Vec<&StoredRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        compare_child(&a.value, &b.value, &query.order_by).then_with(|| a.id.cmp(&b.id))
    });
    let skip = ordered.len().saturating_sub(query.limit);
    let result: Vec<StoredRecord> = ordered.into_iter().skip(skip).cloned().collect();
    if result.is_empty() { None } else { Some(result) }
}

/// Type rank for child ordering: missing/null, booleans, numbers, strings,
/// then everything else.
fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(_) => 4,
    }
}

fn compare_child(a: &Value, b: &Value, key: &str) -> Ordering {
    let (a, b) = (a.get(key), b.get(key));
    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(limit: usize) -> RecentQuery {
        RecentQuery::new("testimonials", "createdAt", limit)
    }

    fn ids(snapshot: &Snapshot) -> Vec<&str> {
        snapshot
            .as_ref()
            .map(|records| records.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_watch_emits_null_snapshot_for_empty_collection() {
        // Arrange
        let store = MemoryStore::new();

        // Act
        let mut live = store.watch(query(10));

        // Assert
        assert_eq!(live.next().await, Some(Ok(None)));
    }

    #[tokio::test]
    async fn test_watch_orders_by_child_ascending_and_keeps_last_n() {
        // Arrange
        let store = MemoryStore::new();
        store.insert("testimonials", "c", json!({ "createdAt": "2026-01-03T00:00:00Z" }));
        store.insert("testimonials", "a", json!({ "createdAt": "2026-01-01T00:00:00Z" }));
        store.insert("testimonials", "b", json!({ "createdAt": "2026-01-02T00:00:00Z" }));

        // Act
        let mut live = store.watch(query(2));

        // Assert
        let snapshot = live.next().await.unwrap().unwrap();
        assert_eq!(ids(&snapshot), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_push_assigns_id_and_notifies_watchers() {
        // Arrange
        let store = MemoryStore::new();
        let mut live = store.watch(query(10));
        let _initial = live.next().await;

        // Act
        let id = store
            .push("testimonials", json!({ "createdAt": "2026-01-01T00:00:00Z" }))
            .await
            .unwrap();

        // Assert
        assert!(!id.is_empty());
        let snapshot = live.next().await.unwrap().unwrap();
        assert_eq!(ids(&snapshot), vec![id.as_str()]);
        assert_eq!(store.records("testimonials").len(), 1);
    }

    #[tokio::test]
    async fn test_push_to_other_collection_does_not_notify() {
        // Arrange
        let store = MemoryStore::new();
        let mut live = store.watch(query(10));
        let _initial = live.next().await;

        // Act
        store.push("messages", json!({})).await.unwrap();
        store.push("testimonials", json!({})).await.unwrap();

        // Assert
        let snapshot = live.next().await.unwrap().unwrap();
        assert_eq!(snapshot.map(|records| records.len()), Some(1));
    }

    #[test]
    fn test_missing_child_sorts_before_strings() {
        // Arrange
        let records = vec![
            StoredRecord {
                id: "with".to_owned(),
                value: json!({ "createdAt": "2026-01-01T00:00:00Z" }),
            },
            StoredRecord {
                id: "without".to_owned(),
                value: json!({}),
            },
        ];

        // Act
        let snapshot = evaluate(&records, &query(10));

        // Assert
        assert_eq!(ids(&snapshot), vec!["without", "with"]);
    }

    #[test]
    fn test_dropped_live_query_is_pruned() {
        // Arrange
        let store = MemoryStore::new();
        let live = store.watch(query(10));
        assert_eq!(store.watcher_count(), 1);

        // Act
        drop(live);

        // Assert
        assert_eq!(store.watcher_count(), 0);
    }
}
