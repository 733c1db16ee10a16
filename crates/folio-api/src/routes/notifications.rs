//! Routes for transient notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::delete, routing::get};
use folio_testimonials::domain::notification::Notification;
use uuid::Uuid;

use crate::state::AppState;

/// GET /
async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.widget.notifications())
}

/// DELETE /{id}
async fn dismiss_notification(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.widget.dismiss(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Returns the router for notifications.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/{id}", delete(dismiss_notification))
}
