//! Catalog endpoints: `GET /api/engines` and `GET /api/engines/{id}`.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::work_type::{self, WorkType};

pub async fn handler_engines() -> impl IntoResponse {
    Json(serde_json::json!({ "engines": work_type::catalog() }))
}

/// One catalog entry. Accepts the same spellings as the compute endpoint.
pub async fn handler_engine(Path(id): Path<String>) -> Response {
    match id.parse::<WorkType>() {
        Ok(w) => Json(w.catalog_entry()).into_response(),
        Err(msg) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": msg })),
        )
            .into_response(),
    }
}
