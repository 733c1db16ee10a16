//! Autoplay driver for the carousel.
//!
//! Owns the [`Carousel`] and at most one interval task. The task is
//! restarted whenever the feed length or the autoplay flag changes, and is
//! aborted when the driver is dropped. Every task carries the generation it
//! was started for; ticks from a superseded generation are ignored.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use folio_core::error::DomainError;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::lock;
use crate::domain::carousel::{Carousel, CarouselState};

/// Delay between two autoplay advances.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug)]
struct DriverState {
    carousel: Carousel,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Carousel plus its autoplay timer, for one mounted view.
#[derive(Debug)]
pub struct CarouselDriver {
    shared: Arc<Mutex<DriverState>>,
    interval: Duration,
}

impl Default for CarouselDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CarouselDriver {
    /// Creates an empty carousel that advances every [`AUTOPLAY_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(AUTOPLAY_INTERVAL)
    }

    /// Creates an empty carousel with a custom autoplay interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(DriverState {
                carousel: Carousel::new(),
                generation: 0,
                timer: None,
            })),
            interval,
        }
    }

    /// Returns the current carousel state.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        lock(&self.shared).carousel.state()
    }

    /// Returns `true` while an autoplay timer is scheduled.
    #[must_use]
    pub fn is_autoplay_scheduled(&self) -> bool {
        lock(&self.shared).timer.is_some()
    }

    /// Applies a feed delivery of `len` items.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_feed_update(&self, len: usize) {
        let mut state = lock(&self.shared);
        let previous_len = state.carousel.len();
        state.carousel.on_feed_len(len);
        if previous_len != len {
            self.reschedule(&mut state);
        }
    }

    /// Displays `index` and disables autoplay for the rest of the session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is outside the feed.
    pub fn select(&self, index: usize) -> Result<CarouselState, DomainError> {
        let mut state = lock(&self.shared);
        let was_autoplay = state.carousel.autoplay_enabled();
        state.carousel.select(index)?;
        debug!(index, "carousel index selected");
        if was_autoplay {
            self.reschedule(&mut state);
        }
        Ok(state.carousel.state())
    }

    /// Cancels the running timer, if any, and starts a fresh one when the
    /// carousel should autoplay.
    fn reschedule(&self, state: &mut DriverState) {
        state.generation += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        if !state.carousel.should_autoplay() {
            debug!("carousel autoplay stopped");
            return;
        }

        let generation = state.generation;
        let shared = Arc::downgrade(&self.shared);
        let period = self.interval;
        let start = Instant::now() + period;
        debug!(generation, ?period, "carousel autoplay started");
        state.timer = Some(tokio::spawn(run_autoplay(shared, generation, start, period)));
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        let mut state = lock(&self.shared);
        state.generation += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

async fn run_autoplay(
    shared: Weak<Mutex<DriverState>>,
    generation: u64,
    start: Instant,
    period: Duration,
) {
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(strong) = shared.upgrade() else {
            break;
        };
        let mut state = lock(&strong);
        if state.generation != generation {
            break;
        }
        state.carousel.tick();
    }
}
