//! The testimonials widget: one mounted view over the live feed.
//!
//! Mounting subscribes to the feed and routes every delivery into the
//! carousel. Dropping the widget unsubscribes, stops autoplay, and cancels
//! pending notification timers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone};
use folio_core::clock::Clock;
use folio_core::error::DomainError;
use folio_core::store::DocumentStore;
use uuid::Uuid;

use super::carousel::CarouselDriver;
use super::feed::{FeedController, FeedSubscription};
use super::lock;
use super::notifications::NotificationQueue;
use super::submission::handle_submit_testimonial;
use super::views::WidgetView;
use crate::domain::carousel::CarouselState;
use crate::domain::notification::Notification;
use crate::domain::testimonial::{Testimonial, TestimonialDraft};

/// State of one mounted testimonials section.
pub struct TestimonialsWidget {
    // Declared first so the feed detaches before anything else is torn down.
    subscription: FeedSubscription,
    feed: Arc<Mutex<Vec<Testimonial>>>,
    carousel: Arc<CarouselDriver>,
    notifications: NotificationQueue,
    submitting: AtomicBool,
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl TestimonialsWidget {
    /// Subscribes to the feed of `store` and starts with an empty carousel.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        let feed: Arc<Mutex<Vec<Testimonial>>> = Arc::new(Mutex::new(Vec::new()));
        let carousel = Arc::new(CarouselDriver::new());

        let subscription = {
            let feed = Arc::clone(&feed);
            let carousel = Arc::clone(&carousel);
            FeedController::new(Arc::clone(&store)).subscribe(move |items| {
                // Feed and carousel change together under the feed lock.
                let mut current = lock(&feed);
                *current = items;
                carousel.on_feed_update(current.len());
            })
        };

        Self {
            subscription,
            feed,
            carousel,
            notifications: NotificationQueue::new(),
            submitting: AtomicBool::new(false),
            store,
            clock,
        }
    }

    /// Returns the current view with dates labelled in the viewer's local
    /// time zone.
    #[must_use]
    pub fn view(&self) -> WidgetView {
        self.view_at(&self.clock.local_now())
    }

    /// Returns the current view with dates labelled in `tz`.
    #[must_use]
    pub fn view_in<Tz>(&self, tz: &Tz) -> WidgetView
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.view_at(&self.clock.now().with_timezone(tz))
    }

    fn view_at<Tz>(&self, now: &DateTime<Tz>) -> WidgetView
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let feed = lock(&self.feed);
        WidgetView::build(&feed, self.carousel.state(), now)
    }

    /// Returns the carousel state.
    #[must_use]
    pub fn carousel(&self) -> CarouselState {
        self.carousel.state()
    }

    /// Displays `index` and turns autoplay off for the rest of the session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is outside the feed.
    pub fn select(&self, index: usize) -> Result<CarouselState, DomainError> {
        self.carousel.select(index)
    }

    /// Submits `draft`. On success the draft is cleared; on any failure it
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the draft is incomplete or
    /// another submission is still in flight, and `DomainError::StoreWrite`
    /// if the store rejects the append.
    pub async fn submit(&self, draft: &mut TestimonialDraft) -> Result<String, DomainError> {
        let _in_flight = InFlight::acquire(&self.submitting)?;
        handle_submit_testimonial(
            draft,
            self.clock.as_ref(),
            self.store.as_ref(),
            &self.notifications,
        )
        .await
    }

    /// Returns `true` while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Returns the visible notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.snapshot()
    }

    /// Removes a notification before it expires.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    /// Returns `true` while the feed subscription is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }
}

/// Holds the in-flight flag for the duration of one submission.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, DomainError> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(DomainError::Validation(
                "A submission is already in progress".to_owned(),
            ));
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
