//! HTTP surface
//!
//! `/api/toy` routes backed by a [`ToyRepository`], CORS for the configured
//! front-end origins, and a static fallback that serves the single-page app
//! for every other path.

mod error;
mod handlers;
mod params;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::AppConfig;
use crate::storage::ToyRepository;

pub use error::{ApiError, ApiResult};
pub use params::parse_filter;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ToyRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ToyRepository>) -> Self {
        Self { repo }
    }
}

/// The `/api/toy` routes alone.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/toy",
            get(handlers::list_toys).post(handlers::create_toy),
        )
        .route(
            "/api/toy/:id",
            get(handlers::get_toy)
                .put(handlers::update_toy)
                .delete(handlers::delete_toy),
        )
        .with_state(state)
}

/// Full application: API, static front-end with `index.html` fallback,
/// CORS and request tracing.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let index = config.public_dir.join("index.html");
    let static_files = ServeDir::new(&config.public_dir).fallback(ServeFile::new(index));

    api_router(state)
        .fallback_service(static_files)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
