//! HTTP request handlers for the NTN service.
//!
//! Every endpoint answers with the `{data, errors}` envelope: `200 OK` with
//! `data` on success, `400 Bad Request` with `errors` on any validation
//! failure.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use ntn::{
    sites::select_within_radius,
    validate::{
        check_version, validate_radius_query, validate_samples_query, validate_site_query,
        RawParams,
    },
    Envelope, ErrorCode, SampleMap,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Raw query-string parameters.
///
/// Unlike `Query<T>`, a query string that cannot be decoded is answered
/// with a `01x999` envelope instead of the framework's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub RawParams);

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Query::<HashMap<String, String>>::try_from_uri(&parts.uri) {
            Ok(Query(params)) => Ok(QueryParams(params)),
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Undecodable query string");
                Err(respond(Envelope::failure(ErrorCode::Unknown)))
            }
        }
    }
}

/// The `{version}` path segment.
///
/// A segment that cannot be decoded is answered with a `01x001` envelope
/// instead of the framework's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ApiVersion(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(version)) => Ok(ApiVersion(version)),
            Err(e) => {
                tracing::warn!(uri = %parts.uri, error = %e, "Undecodable version segment");
                Err(respond(Envelope::failure(ErrorCode::InvalidVersion)))
            }
        }
    }
}

/// Turn an envelope into a response, choosing the status from its contents.
pub fn respond(envelope: Envelope) -> Response {
    let status = if envelope.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(envelope)).into_response()
}

/// Weekly samples for a site between two dates.
///
/// Dates are unix timestamps and are compared at month granularity. A site
/// id with no samples yields `200` with empty `data`.
#[utoipa::path(
    get,
    path = "/{version}/ntn/samples/get/by_id/",
    tag = "samples",
    params(
        ("version" = String, Path, description = "API version, must be `v1.0`"),
        ("site_id" = String, Query, description = "4-character site id"),
        ("start_date" = i64, Query, description = "Unix timestamp, inclusive"),
        ("end_date" = i64, Query, description = "Unix timestamp, inclusive"),
    ),
    responses(
        (status = 200, description = "`{data: {site_id: {labno: {...}}}, errors: {}}`"),
        (status = 400, description = "`{data: {}, errors: {code: message}}`"),
    )
)]
pub async fn samples_by_id(
    State(state): State<Arc<AppState>>,
    ApiVersion(version): ApiVersion,
    QueryParams(params): QueryParams,
) -> Response {
    if let Err(entry) = check_version(&version) {
        return respond(Envelope::failure(entry));
    }

    let query = match validate_samples_query(&params, Utc::now()) {
        Ok(query) => query,
        Err(rejection) => {
            tracing::debug!(?rejection, "Samples query rejected");
            return respond(Envelope::failure(rejection));
        }
    };

    tracing::debug!(
        site_id = %query.site_id,
        start = %query.start,
        end = %query.end,
        "Samples query"
    );

    let store = state.samples.clone();
    let samples = match tokio::task::spawn_blocking(move || store.load(&query)).await {
        Ok(samples) => samples,
        Err(e) => {
            tracing::error!(error = %e, "Sample scan task failed");
            SampleMap::new()
        }
    };

    respond(Envelope::success(&samples))
}

/// Metadata for one site.
///
/// A well-formed id that is not in the site feed is rejected with `01x004`.
#[utoipa::path(
    get,
    path = "/{version}/ntn/site/info/",
    tag = "sites",
    params(
        ("version" = String, Path, description = "API version, must be `v1.0`"),
        ("site_id" = String, Query, description = "4-character site id"),
    ),
    responses(
        (status = 200, description = "`{data: {...site fields}, errors: {}}`"),
        (status = 400, description = "`{data: {}, errors: {code: message}}`"),
    )
)]
pub async fn site_info(
    State(state): State<Arc<AppState>>,
    ApiVersion(version): ApiVersion,
    QueryParams(params): QueryParams,
) -> Response {
    if let Err(entry) = check_version(&version) {
        return respond(Envelope::failure(entry));
    }

    let query = match validate_site_query(&params) {
        Ok(query) => query,
        Err(rejection) => {
            tracing::debug!(?rejection, "Site query rejected");
            return respond(Envelope::failure(rejection));
        }
    };

    let mut sites = state.site_feed.load().await;

    match sites.remove(&query.site_id) {
        Some(site) => respond(Envelope::success(&site)),
        None => {
            tracing::info!(site_id = %query.site_id, "Site not found in feed");
            respond(Envelope::failure(ErrorCode::InvalidSiteId))
        }
    }
}

/// All sites within a radius of a point.
///
/// Inactive sites are included unless `include_inactive=False`.
#[utoipa::path(
    get,
    path = "/{version}/ntn/site/info/by_radius",
    tag = "sites",
    params(
        ("version" = String, Path, description = "API version, must be `v1.0`"),
        ("location" = String, Query, description = "`(lat,lon)` in decimal degrees"),
        ("radius" = f64, Query, description = "Miles, 0 to 3958.8"),
        ("include_inactive" = Option<String>, Query, description = "`True` (default) or `False`"),
    ),
    responses(
        (status = 200, description = "`{data: {site_id: {...}}, errors: {}}`"),
        (status = 400, description = "`{data: {}, errors: {code: message}}`"),
    )
)]
pub async fn site_info_by_radius(
    State(state): State<Arc<AppState>>,
    ApiVersion(version): ApiVersion,
    QueryParams(params): QueryParams,
) -> Response {
    if let Err(entry) = check_version(&version) {
        return respond(Envelope::failure(entry));
    }

    let query = match validate_radius_query(&params) {
        Ok(query) => query,
        Err(rejection) => {
            tracing::debug!(?rejection, "Radius query rejected");
            return respond(Envelope::failure(rejection));
        }
    };

    let sites = state.site_feed.load().await;
    let nearby = select_within_radius(sites, &query);

    tracing::info!(
        lat = query.location.lat,
        lon = query.location.lon,
        radius = query.radius,
        include_inactive = query.include_inactive,
        matches = nearby.len(),
        "Radius query"
    );

    respond(Envelope::success(&nearby))
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn test_respond_status_follows_errors() {
        let ok = respond(Envelope::success(&SampleMap::new()));
        assert_eq!(ok.status(), StatusCode::OK);

        let rejected = respond(Envelope::failure(ErrorCode::InvalidVersion));
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_string_decoding() {
        let uri: Uri = "/v1.0/ntn/site/info/by_radius?location=(42.4944,%20-108.8320)&radius=20"
            .parse()
            .unwrap();
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&uri).unwrap();
        assert_eq!(params["location"], "(42.4944, -108.8320)");
        assert_eq!(params["radius"], "20");
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }
}
