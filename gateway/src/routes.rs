//! The gateway routing table
//!
//! The Nginx configuration of the original deployment, as an axum router:
//!
//! - `/api/docs/`: static documentation with fallback to `redoc.html`
//! - `/api/`, `/admin/`: proxied to the application server
//! - `/static/`, `/media/`: filesystem aliases
//! - everything else: the SPA bundle, falling back to `index.html`

use crate::proxy;
use crate::state::GatewayState;
use axum::{
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the gateway router
pub fn create_router(state: GatewayState) -> Router {
    let paths = &state.config.paths;

    let docs_service = ServeDir::new(&paths.docs_root)
        .not_found_service(ServeFile::new(paths.docs_root.join("redoc.html")));
    let spa_service = ServeDir::new(&paths.spa_root)
        .not_found_service(ServeFile::new(paths.spa_root.join("index.html")));
    let static_service = ServeDir::new(&paths.static_root);
    let media_service = ServeDir::new(&paths.media_root);

    Router::new()
        .route("/healthz", get(healthz))
        // Specific before general: docs live under /api/ but are static
        .nest_service("/api/docs", docs_service)
        .route("/api", any(proxy::proxy_handler))
        .route("/api/", any(proxy::proxy_handler))
        .route("/api/*path", any(proxy::proxy_handler))
        .route("/admin", any(proxy::proxy_handler))
        .route("/admin/", any(proxy::proxy_handler))
        .route("/admin/*path", any(proxy::proxy_handler))
        .nest_service("/static", static_service)
        .nest_service("/media", media_service)
        // Unmatched paths belong to the single-page app
        .fallback_service(spa_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Gateway liveness endpoint
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
