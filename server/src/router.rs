use std::path::Path;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `/health` plus the built frontend. Paths that match no file get
/// `index.html` so client-side navigation survives a reload.
pub fn build_router(dist_dir: &Path, allowed_origin: HeaderValue) -> Router {
    let index = dist_dir.join("index.html");
    let static_files = ServeDir::new(dist_dir).fallback(ServeFile::new(index));

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
