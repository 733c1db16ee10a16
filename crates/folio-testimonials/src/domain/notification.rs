//! Transient status notifications.

use serde::Serialize;
use uuid::Uuid;

/// Shown after a testimonial is accepted by the store.
pub const SUBMITTED_MESSAGE: &str = "Thank you! Your review will be displayed shortly.";
/// Shown after the store rejects a testimonial.
pub const SUBMIT_FAILED_MESSAGE: &str = "Error submitting review. Please try again.";

/// Outcome category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
}

/// A user-visible status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Unique, time-ordered identifier.
    pub id: Uuid,
    /// Outcome category.
    pub kind: NotificationKind,
    /// Display text.
    pub message: String,
}

impl Notification {
    /// Creates a notification with a fresh id.
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            message: message.into(),
        }
    }
}
