//! Read-only view DTOs handed to the presentation layer.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::domain::carousel::CarouselState;
use crate::domain::date_label::format_created_at;
use crate::domain::testimonial::Testimonial;

/// A testimonial ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialView {
    /// The testimonial itself.
    #[serde(flatten)]
    pub testimonial: Testimonial,
    /// Relative label for `createdAt`, e.g. `Today at 3:07 PM`.
    pub created_label: String,
}

/// Everything the testimonials section renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    /// The feed, most recent first.
    pub items: Vec<TestimonialView>,
    /// Which item is displayed.
    pub carousel: CarouselState,
}

impl WidgetView {
    /// Builds the view for `items`, labelling dates relative to `now`.
    #[must_use]
    pub fn build<Tz>(items: &[Testimonial], carousel: CarouselState, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let items = items
            .iter()
            .map(|testimonial| TestimonialView {
                created_label: format_created_at(testimonial.created_at, now),
                testimonial: testimonial.clone(),
            })
            .collect();
        Self { items, carousel }
    }

    /// The displayed testimonial, if any.
    #[must_use]
    pub fn active(&self) -> Option<&TestimonialView> {
        match self.carousel {
            CarouselState::Empty => None,
            CarouselState::Active { active_index, .. } => self.items.get(active_index),
        }
    }
}
