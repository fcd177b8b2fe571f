//! Shared test helpers for integration tests.

#![allow(dead_code)]

use mathwork::config::EngineConfig;
use std::io::Write;

/// Build an Axum test app router with the default configuration.
pub fn build_test_app() -> axum::Router {
    build_test_app_with(&EngineConfig::default())
}

/// Build an Axum test app router with a specific configuration.
pub fn build_test_app_with(config: &EngineConfig) -> axum::Router {
    let state = mathwork::server::AppState::new(config);
    mathwork::server::build_router(state)
}

/// Write `content` to a temporary `.toml` file. Keep the handle alive for as
/// long as the path is needed.
pub fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("failed to write temp config");
    file
}
