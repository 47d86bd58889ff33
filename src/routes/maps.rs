//! Map provider endpoints
//!
//! - `GET /api/config/mapbox` - token bootstrap for the front-end map
//! - `GET /api/geocode/:location` - forward geocoding
//! - `GET /api/directions/:mode/:coordinates` - routing

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{error::AppResult, AppState};

/// Token bootstrap response
#[derive(Debug, Serialize, Deserialize)]
pub struct MapboxConfigResponse {
    pub token: String,
}

/// Path parameters for directions
#[derive(Debug, Deserialize)]
pub struct DirectionsPath {
    pub mode: String,
    pub coordinates: String,
}

/// Query parameters for directions
#[derive(Debug, Default, Deserialize)]
pub struct DirectionsQuery {
    /// Comma-separated road features to avoid, e.g. `toll,ferry`
    pub exclude: Option<String>,
}

/// Return the map provider token
pub async fn mapbox_config(State(state): State<Arc<AppState>>) -> Json<MapboxConfigResponse> {
    Json(MapboxConfigResponse {
        token: state.mapbox.access_token().to_string(),
    })
}

/// Geocode a free-text location
pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> AppResult<Json<Value>> {
    info!(location = %location, "Processing geocoding request");

    let data = state.mapbox.geocode(&location).await?;
    Ok(Json(data))
}

/// Fetch directions for a coordinate sequence
pub async fn directions(
    State(state): State<Arc<AppState>>,
    Path(DirectionsPath { mode, coordinates }): Path<DirectionsPath>,
    Query(query): Query<DirectionsQuery>,
) -> AppResult<Json<Value>> {
    info!(
        mode = %mode,
        coordinates = %coordinates,
        exclude = ?query.exclude,
        "Processing directions request"
    );

    let data = state
        .mapbox
        .directions(&mode, &coordinates, query.exclude.as_deref())
        .await?;
    Ok(Json(data))
}
