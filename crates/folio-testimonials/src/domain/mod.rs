//! Domain types and pure state transitions.

pub mod carousel;
pub mod date_label;
pub mod notification;
pub mod testimonial;
