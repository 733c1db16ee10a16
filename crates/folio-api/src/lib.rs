//! Folio API: HTTP surface over the testimonials widget.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
