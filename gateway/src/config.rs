//! Configuration management for the FoodGram gateway
//!
//! Loaded the same way as the operations binary: defaults, then an optional
//! `config/{development,production}.toml`, then environment variables with
//! the FGW__ prefix (e.g. `FGW__UPSTREAM__URL`).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub paths: PathsConfig,
}

/// Listen address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The application server requests are proxied to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub url: String,
}

/// Filesystem roots served directly by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Served under `/static/`
    pub static_root: PathBuf,
    /// Served under `/media/`
    pub media_root: PathBuf,
    /// Served under `/api/docs/`, falling back to `redoc.html`
    pub docs_root: PathBuf,
    /// The frontend bundle, with `index.html` fallback for SPA routes
    pub spa_root: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 80,
            },
            upstream: UpstreamConfig {
                url: "http://backend:8000".to_string(),
            },
            paths: PathsConfig {
                static_root: PathBuf::from("static"),
                media_root: PathBuf::from("media"),
                docs_root: PathBuf::from("docs"),
                spa_root: PathBuf::from("frontend"),
            },
        }
    }
}

impl GatewayConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&GatewayConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix("FGW").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
