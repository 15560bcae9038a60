//! NTN Service - HTTP microservice for NADP/NTN deposition data.
//!
//! A read-only REST API over weekly precipitation chemistry samples and
//! monitoring-site metadata.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NTN_SITES_URL` | Remote site-metadata feed | NADP NTN site CSV |
//! | `NTN_SAMPLES_PATH` | Weekly sample file | `NTN-All-w.csv` |
//! | `NTN_FEED_TIMEOUT_SECS` | Site feed request timeout | 30 |
//! | `NTN_PORT` | HTTP server port | 2300 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /v1.0/ntn/samples/get/by_id/?site_id=&start_date=&end_date=` - Weekly samples
//! - `GET /v1.0/ntn/site/info/?site_id=` - Site metadata
//! - `GET /v1.0/ntn/site/info/by_radius?location=&radius=&include_inactive=` - Nearby sites
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use ntn::NtnConfigBuilder;
use ntn_service::{handlers, router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the NTN service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "NTN Deposition Data Service",
        version = "0.1.0",
        description = "Read-only REST API over NADP National Trends Network samples and sites.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::samples_by_id,
        handlers::site_info,
        handlers::site_info_by_radius,
        handlers::health_check,
    ),
    components(schemas(handlers::HealthResponse)),
    tags(
        (name = "samples", description = "Weekly sample endpoints"),
        (name = "sites", description = "Site metadata endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ntn_service=info,ntn=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("NTN_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2300);

    let config = NtnConfigBuilder::from_env().build()?;

    if !config.samples_path().exists() {
        tracing::warn!(
            path = %config.samples_path().display(),
            "Sample file not found, sample queries will return no data"
        );
    }

    tracing::info!(
        sites_url = config.sites_url(),
        samples_path = %config.samples_path().display(),
        feed_timeout_secs = config.feed_timeout().as_secs(),
        port = port,
        "Starting NTN service"
    );

    let state = Arc::new(AppState::new(&config)?);

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(router(state));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
