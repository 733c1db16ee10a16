//! Self-expiring notification queue.
//!
//! Each entry owns a timer task that removes it once its time to live has
//! elapsed. Reads also filter on the deadline, so an entry is never shown
//! past its expiry even if its timer has not been polled yet.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;
use uuid::Uuid;

use super::lock;
use crate::domain::notification::{Notification, NotificationKind};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug)]
struct Entry {
    notification: Notification,
    expires_at: Instant,
    expiry: JoinHandle<()>,
}

/// Insertion-ordered queue of transient notifications.
#[derive(Debug)]
pub struct NotificationQueue {
    entries: Arc<Mutex<Vec<Entry>>>,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    /// Creates a queue whose entries live for [`NOTIFICATION_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    /// Creates a queue with a custom time to live.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Appends a notification and schedules its removal. Returns its id.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        let notification = Notification::new(kind, message);
        let id = notification.id;
        let expires_at = Instant::now() + self.ttl;
        let expiry = tokio::spawn(expire(Arc::downgrade(&self.entries), id, expires_at));

        debug!(%id, ?kind, "notification enqueued");
        lock(&self.entries).push(Entry {
            notification,
            expires_at,
            expiry,
        });
        id
    }

    /// Returns the notifications that have not expired, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        let now = Instant::now();
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Removes a notification before it expires. Returns `false` if it was
    /// already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = lock(&self.entries);
        let Some(position) = entries.iter().position(|entry| entry.notification.id == id) else {
            return false;
        };
        let entry = entries.remove(position);
        entry.expiry.abort();
        true
    }
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        for entry in lock(&self.entries).drain(..) {
            entry.expiry.abort();
        }
    }
}

async fn expire(entries: Weak<Mutex<Vec<Entry>>>, id: Uuid, expires_at: Instant) {
    time::sleep_until(expires_at).await;
    let Some(entries) = entries.upgrade() else {
        return;
    };
    lock(&entries).retain(|entry| entry.notification.id != id);
    debug!(%id, "notification expired");
}
