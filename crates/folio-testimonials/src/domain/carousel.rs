//! Carousel state machine.
//!
//! Pure transitions only. Scheduling the autoplay tick lives in
//! `application::carousel`.

use folio_core::error::DomainError;
use serde::Serialize;

/// Observable carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CarouselState {
    /// The feed is empty; nothing is displayed.
    Empty,
    /// One testimonial is displayed.
    #[serde(rename_all = "camelCase")]
    Active {
        /// Index of the displayed testimonial, always below the feed length.
        active_index: usize,
        /// Whether the timer advances the index.
        autoplay_enabled: bool,
    },
}

/// Carousel over a feed of `len` items.
///
/// Autoplay starts enabled and, once the user selects an item, stays
/// disabled for the lifetime of the value, including across empty feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    active_index: usize,
    autoplay: bool,
}

impl Default for Carousel {
    fn default() -> Self {
        Self {
            len: 0,
            active_index: 0,
            autoplay: true,
        }
    }
}

impl Carousel {
    /// Creates an empty carousel with autoplay enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the observable state.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        if self.len == 0 {
            CarouselState::Empty
        } else {
            CarouselState::Active {
                active_index: self.active_index,
                autoplay_enabled: self.autoplay,
            }
        }
    }

    /// Number of items in the feed the carousel runs over.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether autoplay is still enabled.
    #[must_use]
    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay
    }

    /// Returns `true` when the autoplay timer should be running.
    #[must_use]
    pub fn should_autoplay(&self) -> bool {
        self.autoplay && self.len > 1
    }

    /// Applies a feed delivery of `len` items: an empty feed goes `Empty`,
    /// the first non-empty feed starts at index 0, and later feeds clamp
    /// the index into range.
    pub fn on_feed_len(&mut self, len: usize) {
        self.active_index = if self.len == 0 || len == 0 {
            0
        } else {
            self.active_index.min(len - 1)
        };
        self.len = len;
    }

    /// Advances to the next item if autoplay should be running. Returns
    /// whether the index moved.
    pub fn tick(&mut self) -> bool {
        if !self.should_autoplay() {
            return false;
        }
        self.active_index = (self.active_index + 1) % self.len;
        true
    }

    /// Displays `index` and turns autoplay off for good.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is not a valid position
    /// in the current feed. The state is left unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), DomainError> {
        if index >= self.len {
            return Err(DomainError::Validation(format!(
                "carousel index {index} out of range for {} testimonials",
                self.len
            )));
        }
        self.active_index = index;
        self.autoplay = false;
        Ok(())
    }
}
