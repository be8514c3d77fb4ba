//! Shared gateway state
//!
//! One upstream HTTP client and the configuration, both cheap to clone
//! across request handlers.

use crate::config::GatewayConfig;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Shared state passed to all handlers
#[derive(Clone)]
pub struct GatewayState {
    /// Pooled client for upstream requests
    pub http: reqwest::Client,
    /// Gateway configuration
    pub config: Arc<GatewayConfig>,
}

impl GatewayState {
    /// Build the state, constructing the upstream client once at startup
    ///
    /// Redirects are not followed: responses pass back to the caller
    /// unchanged, as a reverse proxy must.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }
}
