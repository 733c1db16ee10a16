//! Routes for the testimonials section.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use folio_testimonials::application::views::WidgetView;
use folio_testimonials::domain::carousel::CarouselState;
use folio_testimonials::domain::testimonial::{DEFAULT_RATING, TestimonialDraft};

use crate::error::ApiError;
use crate::state::AppState;

fn default_rating() -> u8 {
    DEFAULT_RATING
}

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct SubmitTestimonialRequest {
    /// Reviewer name.
    pub author: String,
    /// Reviewer role or company.
    pub role: String,
    /// Star rating; the form defaults it to 5.
    #[serde(default = "default_rating")]
    pub rating: u8,
    /// Review body.
    pub text: String,
}

/// Response body for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitTestimonialResponse {
    /// The id the store assigned.
    pub id: String,
}

/// Request body for POST /carousel/select.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Index of the testimonial to display.
    pub index: usize,
}

/// GET /
async fn get_testimonials(State(state): State<AppState>) -> Json<WidgetView> {
    Json(state.widget.view())
}

/// POST /
#[instrument(skip(state, request), fields(rating = request.rating))]
async fn submit_testimonial(
    State(state): State<AppState>,
    Json(request): Json<SubmitTestimonialRequest>,
) -> Result<(StatusCode, Json<SubmitTestimonialResponse>), ApiError> {
    let mut draft =
        TestimonialDraft::new(request.author, request.role, request.rating, request.text);

    let id = state.widget.submit(&mut draft).await?;
    info!(%id, "testimonial accepted");

    Ok((StatusCode::CREATED, Json(SubmitTestimonialResponse { id })))
}

/// POST /carousel/select
#[instrument(skip(state))]
async fn select_testimonial(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<CarouselState>, ApiError> {
    Ok(Json(state.widget.select(request.index)?))
}

/// Returns the router for the testimonials section.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_testimonials).post(submit_testimonial))
        .route("/carousel/select", post(select_testimonial))
}
