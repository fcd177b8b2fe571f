//! # Compute Endpoint
//!
//! `POST /api/compute` with a [`ComputationRequest`] body.
//!
//! | Status | When |
//! |--------|------|
//! | 200 | `success = true` (computed or served from cache) |
//! | 422 | `success = false`; the body is the failed envelope |
//! | 400 | body is not a valid request document |
//! | 500 | the blocking dispatch task panicked |
//!
//! Every computed or cached response carries `X-Cache: hit` or `X-Cache: miss`.
//! Dispatch runs on tokio's blocking pool since sieve-backed work types can
//! hold a core for a noticeable time.

use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::registry::{ComputationRequest, ComputationResult};

const CACHE_HEADER: &str = "x-cache";

pub async fn handler_compute(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ComputationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response()
        }
    };

    let key = request.cache_key();
    if let Some(hit) = state.cache.get(&key) {
        state.prom_metrics.cache_hits.inc();
        debug!(work_type = %request.work_type, "cache hit");
        return envelope_response(hit, "hit");
    }
    state.prom_metrics.cache_misses.inc();

    let worker = Arc::clone(&state);
    let result =
        match tokio::task::spawn_blocking(move || worker.registry.dispatch_request(&request)).await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "compute task failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "computation task failed" })),
                )
                    .into_response();
            }
        };

    state.prom_metrics.record(&result);
    state.cache.insert(key, result.clone());
    envelope_response(result, "miss")
}

fn envelope_response(result: ComputationResult, cache: &'static str) -> Response {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, [(CACHE_HEADER, cache)], Json(result)).into_response()
}
