//! Mapbox proxy
//!
//! Geocoding and directions lookups with the server-held access token.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{config::Config, error::AppResult, proxy::relay_json};

const PROVIDER: &str = "Mapbox";

/// Mapbox API client
pub struct MapboxClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MapboxClient {
    /// Create a new Mapbox client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.mapbox_api_url.clone(),
            access_token: config.mapbox_token.clone(),
        }
    }

    /// Access token handed to the front-end for map tile rendering
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Forward-geocode free text
    #[instrument(skip(self))]
    pub async fn geocode(&self, location: &str) -> AppResult<Value> {
        let url = self.geocode_url(location);
        debug!(path = %self.geocode_path(location), "Forwarding geocoding request");
        relay_json(PROVIDER, self.client.get(url)).await
    }

    /// Route between coordinates. `mode` and `coordinates` are forwarded as-is;
    /// the upstream rejects values it does not understand.
    #[instrument(skip(self))]
    pub async fn directions(
        &self,
        mode: &str,
        coordinates: &str,
        exclude: Option<&str>,
    ) -> AppResult<Value> {
        let url = self.directions_url(mode, coordinates, exclude);
        debug!(mode, coordinates, exclude, "Forwarding directions request");
        relay_json(PROVIDER, self.client.get(url)).await
    }

    /// Geocoding path with the location percent-encoded as a single segment
    pub fn geocode_path(&self, location: &str) -> String {
        format!(
            "/geocoding/v5/mapbox.places/{}.json",
            urlencoding::encode(location)
        )
    }

    /// Full geocoding URL including the access token
    pub fn geocode_url(&self, location: &str) -> String {
        format!(
            "{}{}?access_token={}",
            self.base_url,
            self.geocode_path(location),
            urlencoding::encode(&self.access_token)
        )
    }

    /// Full directions URL including the access token. An empty exclusion
    /// list is treated as absent.
    pub fn directions_url(&self, mode: &str, coordinates: &str, exclude: Option<&str>) -> String {
        let mut url = format!(
            "{}/directions/v5/mapbox/{}/{}?geometries=geojson&access_token={}",
            self.base_url,
            mode,
            coordinates,
            urlencoding::encode(&self.access_token)
        );

        if let Some(exclude) = exclude.filter(|e| !e.is_empty()) {
            url.push_str("&exclude=");
            url.push_str(exclude);
        }

        url
    }
}
