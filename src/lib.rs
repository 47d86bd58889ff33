//! Waypoint Gateway - key-shielding proxy for map and language-model APIs
//!
//! The gateway holds the upstream credentials, forwards geocoding, directions
//! and content-generation calls on behalf of the front-end, and relays the
//! upstream JSON unchanged.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::{GeminiClient, MapboxClient};

/// Application state shared across all request handlers.
///
/// Built once at startup and read-only afterwards.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    pub mapbox: Arc<MapboxClient>,
    pub gemini: Arc<GeminiClient>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        Ok(Self::with_client(config, http_client))
    }

    /// Create application state around an existing HTTP client. Both
    /// upstream clients share its connection pool.
    pub fn with_client(config: Config, http_client: reqwest::Client) -> Self {
        let mapbox = Arc::new(MapboxClient::new(http_client.clone(), &config));
        let gemini = Arc::new(GeminiClient::new(http_client, &config));

        Self {
            config,
            start_time: Instant::now(),
            mapbox,
            gemini,
        }
    }
}
