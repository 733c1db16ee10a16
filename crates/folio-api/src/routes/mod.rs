//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod notifications;
pub mod testimonials;

/// Assembles every route under its prefix.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/testimonials", testimonials::router())
        .nest("/api/v1/notifications", notifications::router())
        .with_state(state)
}
