//! Waypoint Gateway - key-shielding proxy for map and language-model APIs
//!
//! This is the main entry point for the gateway server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use waypoint_gateway::{routes, AppState, Config};

const DEFAULT_LOG_FILTER: &str = "waypoint_gateway=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    // Refuse to start without both upstream secrets; nothing is bound yet
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        mapbox_api_url = %config.mapbox_api_url,
        gemini_api_url = %config.gemini_api_url,
        gemini_model = %config.gemini_model,
        static_dir = %config.static_dir,
        "Configuration loaded"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    let state = Arc::new(AppState::new(config)?);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Gateway listening, front-end at http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let signal = shutdown_signal().await;
            warn!(%addr, signal, "Stopping gateway, draining in-flight requests");
        })
        .await?;

    info!(%addr, "Gateway stopped");
    Ok(())
}

/// `LOG_FORMAT=json` switches to structured output for log collectors
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

/// Resolves with the name of the first shutdown signal received
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => tokio::select! {
                _ = tokio::signal::ctrl_c() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
            },
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "Ctrl+C"
    }
}
