//! Proxy module
//!
//! Handles request forwarding to the map and language-model upstreams.

pub mod gemini;
pub mod mapbox;

pub use gemini::GeminiClient;
pub use mapbox::MapboxClient;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};

/// Send one prepared upstream request and relay its JSON body.
///
/// Transport failures, non-success statuses and undecodable bodies all
/// collapse into [`AppError::Upstream`].
pub(crate) async fn relay_json(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> AppResult<Value> {
    let response = request.send().await.map_err(|e| {
        let err = AppError::upstream_transport(provider, e);
        error!(provider, error = %err, "Upstream request failed");
        err
    })?;

    let status = response.status();
    debug!(provider, status = %status, "Upstream response status");

    if !status.is_success() {
        let err = AppError::upstream_status(provider, status);
        error!(provider, status = %status, "Upstream returned an error status");
        return Err(err);
    }

    response.json::<Value>().await.map_err(|e| {
        let err = AppError::upstream_transport(provider, e);
        error!(provider, error = %err, "Failed to decode upstream response");
        err
    })
}
