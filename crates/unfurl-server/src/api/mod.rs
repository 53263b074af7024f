mod preview;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::X_CONTENT_TYPE_OPTIONS, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use unfurl_catalog::CatalogClient;
use unfurl_core::{resolve_backend_origin, AppConfig, SettingsSource};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: CatalogClient,
    /// Read on every request so deployment settings apply without a restart.
    pub settings: Arc<dyn SettingsSource>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    backend_origin: String,
    origin_source: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/p", get(preview::missing_slug))
        .route("/p/", get(preview::missing_slug))
        .route("/p/{slug}", get(preview::product_preview))
        .route("/p/{slug}/", get(preview::product_preview))
        .fallback(preview::missing_slug)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Reports the backend origin a preview request with the same `Host` would use.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok());
    let origin = resolve_backend_origin(state.settings.as_ref(), host);

    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            backend_origin: origin.url,
            origin_source: origin.source.as_str(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
