//! Common test utilities for gateway integration tests
//!
//! Builds the router against temporary filesystem roots and a caller-chosen
//! upstream URL, with a mock client address injected for the forwarding
//! headers.

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use foodgram_gateway::config::{GatewayConfig, PathsConfig, ServerConfig, UpstreamConfig};
use foodgram_gateway::{routes, state::GatewayState};
use std::net::SocketAddr;
use std::path::Path;
use tower::ServiceExt;

/// The client address MockConnectInfo injects for every test request
pub const TEST_CLIENT_IP: &str = "127.0.0.1";

/// Test gateway wrapper
pub struct TestGateway {
    pub app: Router,
}

impl TestGateway {
    /// Build a gateway whose filesystem roots live under `root`
    /// (`static/`, `media/`, `docs/`, `frontend/`)
    pub fn new(upstream_url: &str, root: &Path) -> Self {
        let config = GatewayConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            upstream: UpstreamConfig {
                url: upstream_url.to_string(),
            },
            paths: PathsConfig {
                static_root: root.join("static"),
                media_root: root.join("media"),
                docs_root: root.join("docs"),
                spa_root: root.join("frontend"),
            },
        };

        let state = GatewayState::new(config).expect("Failed to build gateway state");
        let app = routes::create_router(state)
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4321))));

        Self { app }
    }

    /// Make a GET request and return the full response
    pub async fn get_response(&self, path: &str, host: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(host) = host {
            builder = builder.header("host", host);
        }
        let request = builder.body(Body::empty()).unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request and return status and body text
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self.get_response(path, None).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}
