//! Shared test mocks and utilities for the Folio testimonials widget.

mod clock;
mod store;

pub use clock::FixedClock;
pub use store::{FailingStore, ScriptedStore, testimonial_record};
