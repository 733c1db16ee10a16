//! Folio Core: shared abstractions.
//!
//! This crate defines the traits and types the testimonials widget
//! depends on: time, errors, and the remote document store capability.
//! It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod store;
