//! # Service Info, Health & Metrics Endpoints
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `GET /` | Service name, version, status and catalog size |
//! | `GET /health` | Liveness, plus the configured engine type |
//! | `GET /metrics` | Prometheus scraping endpoint |
//!
//! There is no readiness probe: the service has no backing store, so once it
//! serves HTTP it can serve computations.

use super::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::work_type::WorkType;

pub async fn handler_index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "mathwork computation engine",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "engines_count": WorkType::ALL.len(),
    }))
}

/// Liveness probe. No dependencies checked.
pub async fn handler_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "engine_type": state.registry.engine_type(),
    }))
}

/// Prometheus metrics endpoint: returns all metrics in text exposition format.
pub async fn handler_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.prom_metrics.encode();
    (
        StatusCode::OK,
        [(
            "content-type",
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    )
}
