//! Folio: testimonials widget core.
//!
//! Mirrors a bounded, most-recent-first feed of testimonials from a live
//! document store, rotates it through an autoplaying carousel, submits new
//! reviews, and surfaces outcomes as self-expiring notifications.

pub mod application;
pub mod domain;
