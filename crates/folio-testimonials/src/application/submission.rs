//! Testimonial submission workflow.
//!
//! Validate the draft, append it to the store, then report the outcome: a
//! cleared draft and a success notification, or an error notification with
//! the draft left intact for a retry.

use folio_core::clock::Clock;
use folio_core::error::DomainError;
use folio_core::store::DocumentStore;
use tracing::{info, instrument, warn};

use super::notifications::NotificationQueue;
use crate::domain::notification::{NotificationKind, SUBMIT_FAILED_MESSAGE, SUBMITTED_MESSAGE};
use crate::domain::testimonial::{COLLECTION, TestimonialDraft};

/// Handles a review submission and returns the id the store assigned.
///
/// Validation failures are returned without touching the store or the
/// notification queue. Concurrent calls are not deduplicated here.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a field is blank or the rating is
/// out of range. Returns `DomainError::StoreWrite` if the append fails.
#[instrument(skip_all, fields(rating = draft.rating))]
pub async fn handle_submit_testimonial(
    draft: &mut TestimonialDraft,
    clock: &dyn Clock,
    store: &dyn DocumentStore,
    notifications: &NotificationQueue,
) -> Result<String, DomainError> {
    draft.validate()?;

    let record = draft.to_record(clock.now());
    let pushed = match serde_json::to_value(&record) {
        Ok(payload) => store.push(COLLECTION, payload).await,
        Err(e) => Err(DomainError::StoreWrite(format!(
            "payload serialization failed: {e}"
        ))),
    };

    match pushed {
        Ok(id) => {
            info!(%id, "testimonial submitted");
            draft.reset();
            notifications.enqueue(NotificationKind::Success, SUBMITTED_MESSAGE);
            Ok(id)
        }
        Err(error) => {
            warn!(%error, "testimonial submission failed");
            notifications.enqueue(NotificationKind::Error, SUBMIT_FAILED_MESSAGE);
            Err(match error {
                DomainError::StoreWrite(_) => error,
                other => DomainError::StoreWrite(other.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use folio_core::error::DomainError;
    use folio_test_support::{FailingStore, FixedClock, ScriptedStore};
    use serde_json::json;

    use crate::application::notifications::NotificationQueue;
    use crate::application::submission::handle_submit_testimonial;
    use crate::domain::notification::NotificationKind;
    use crate::domain::testimonial::TestimonialDraft;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_record_clears_draft_and_notifies() {
        // Arrange
        let clock = fixed_clock();
        let store = ScriptedStore::new();
        let notifications = NotificationQueue::new();
        let mut draft = TestimonialDraft::new("Ana", "Eng", 4, "great");

        // Act
        let result = handle_submit_testimonial(&mut draft, &clock, &store, &notifications).await;

        // Assert
        assert_eq!(result, Ok("rec-1".to_owned()));

        let pushed = store.pushed();
        assert_eq!(pushed.len(), 1);
        let (collection, payload) = &pushed[0];
        assert_eq!(collection, "testimonials");
        assert_eq!(
            *payload,
            json!({
                "author": "Ana",
                "role": "Eng",
                "rating": 4,
                "text": "great",
                "avatar": "/placeholder-user.jpg",
                "createdAt": "2026-01-15T10:00:00.000Z",
            })
        );

        assert_eq!(draft, TestimonialDraft::default());

        let shown = notifications.snapshot();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Success);
        assert_eq!(
            shown[0].message,
            "Thank you! Your review will be displayed shortly."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_empty_author_is_rejected_without_side_effects() {
        // Arrange
        let clock = fixed_clock();
        let store = ScriptedStore::new();
        let notifications = NotificationQueue::new();
        let mut draft = TestimonialDraft::new("", "Eng", 5, "great");
        let before = draft.clone();

        // Act
        let result = handle_submit_testimonial(&mut draft, &clock, &store, &notifications).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.pushed().is_empty());
        assert!(notifications.snapshot().is_empty());
        assert_eq!(draft, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_out_of_range_rating_is_rejected() {
        let clock = fixed_clock();
        let store = ScriptedStore::new();
        let notifications = NotificationQueue::new();
        let mut draft = TestimonialDraft::new("Ana", "Eng", 0, "great");

        let result = handle_submit_testimonial(&mut draft, &clock, &store, &notifications).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.pushed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_preserves_draft_and_notifies_error() {
        // Arrange
        let clock = fixed_clock();
        let notifications = NotificationQueue::new();
        let mut draft = TestimonialDraft::new("Ana", "Eng", 4, "great");
        let before = draft.clone();

        // Act
        let result =
            handle_submit_testimonial(&mut draft, &clock, &FailingStore, &notifications).await;

        // Assert
        assert!(matches!(result, Err(DomainError::StoreWrite(_))));
        assert_eq!(draft, before);

        let shown = notifications.snapshot();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Error);
        assert_eq!(shown[0].message, "Error submitting review. Please try again.");
    }
}
