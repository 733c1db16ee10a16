//! Folio API server entry point.

use std::error::Error;
use std::sync::Arc;

use folio_api::config::ApiConfig;
use folio_api::routes;
use folio_api::state::AppState;
use folio_core::clock::SystemClock;
use folio_store::MemoryStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Folio API server");

    let config = ApiConfig::from_env()?;
    let addr = config.socket_addr()?;

    let app_state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));

    // TODO: Replace CorsLayer::permissive() with the portfolio origin once it is fixed.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
