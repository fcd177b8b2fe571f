//! # Server — HTTP Front End for the Registry
//!
//! Runs an Axum HTTP server that parses computation requests, hands them to
//! the [`Registry`] on the blocking pool, and serializes the envelope. The
//! registry stays synchronous and I/O-free; caching, metrics and request
//! tracing live here.
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | service info |
//! | GET | `/health` | liveness |
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/api/engines` | work-type catalog |
//! | GET | `/api/engines/{id}` | one catalog entry |
//! | POST | `/api/compute` | dispatch a computation |
//!
//! ## Middleware (outermost last)
//!
//! CORS (any origin), panic catcher, request-id span, HTTP trace, 1 MiB body
//! limit, request timeout (`server.request_timeout_secs`, 408 on expiry).

mod cache;
mod routes_compute;
mod routes_engines;
mod routes_health;

pub use cache::ResultCache;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};

use crate::config::EngineConfig;
use crate::prom_metrics;
use crate::registry::Registry;

/// Lock a mutex, recovering from poisoning.
pub(super) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct AppState {
    pub registry: Registry,
    pub cache: ResultCache,
    pub prom_metrics: prom_metrics::Metrics,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(config: &EngineConfig) -> Arc<Self> {
        Arc::new(AppState {
            registry: Registry::new(config),
            cache: ResultCache::new(Duration::from_secs(config.server.cache_ttl_secs)),
            prom_metrics: prom_metrics::Metrics::new(),
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        })
    }
}

/// Middleware that generates (or propagates) a request ID for correlation and
/// wraps the request in a tracing span using `.instrument()` for proper async
/// propagation.
async fn request_id_middleware(req: Request, next: Next) -> axum::response::Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let timeout = state.request_timeout;
    Router::new()
        .route("/", get(routes_health::handler_index))
        .route("/health", get(routes_health::handler_health))
        .route("/metrics", get(routes_health::handler_metrics))
        .route("/api/engines", get(routes_engines::handler_engines))
        .route("/api/engines/{id}", get(routes_engines::handler_engine))
        .route("/api/compute", post(routes_compute::handler_compute))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

pub async fn run(config: &EngineConfig, port: u16) -> Result<()> {
    let state = AppState::new(config);
    let app = build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(
        port,
        engine_type = %config.registry.engine_type,
        cache_ttl_secs = config.server.cache_ttl_secs,
        "server running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT, shutting down"),
                    _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                ctrl_c.await.ok();
                info!("received SIGINT, shutting down");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("received SIGINT, shutting down");
    }
}
