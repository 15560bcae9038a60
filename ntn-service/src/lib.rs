//! NTN Service Library
//!
//! HTTP handlers, application state and routing for the NTN deposition
//! data service. This library is used by both the ntn-service binary and
//! integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use ntn::{NtnConfig, SampleStore, SiteFeed};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Largest request body accepted.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers.
///
/// Holds data-source handles only; no request data is kept between
/// requests.
pub struct AppState {
    /// Client for the remote site-metadata feed.
    pub site_feed: SiteFeed,
    /// Local weekly sample file.
    pub samples: SampleStore,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for the site feed cannot be
    /// created.
    pub fn new(config: &NtnConfig) -> ntn::Result<Self> {
        Ok(Self {
            site_feed: SiteFeed::new(config)?,
            samples: SampleStore::from_config(config),
        })
    }
}

/// Build the API router. Every versioned route also answers with a
/// trailing slash.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:version/ntn/samples/get/by_id", get(handlers::samples_by_id))
        .route("/:version/ntn/samples/get/by_id/", get(handlers::samples_by_id))
        .route("/:version/ntn/site/info", get(handlers::site_info))
        .route("/:version/ntn/site/info/", get(handlers::site_info))
        .route(
            "/:version/ntn/site/info/by_radius",
            get(handlers::site_info_by_radius),
        )
        .route(
            "/:version/ntn/site/info/by_radius/",
            get(handlers::site_info_by_radius),
        )
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{ApiVersion, HealthResponse, QueryParams};
