//! Configuration management for the gateway
//!
//! Configuration is loaded from environment variables once at startup and
//! never mutated afterwards.

use std::env;

use anyhow::{Context, Result};
use thiserror::Error;

/// Environment variable holding the map provider token
pub const MAPBOX_TOKEN_VAR: &str = "MAPBOX_TOKEN";
/// Environment variable holding the language model key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_MAPBOX_API_URL: &str = "https://api.mapbox.com";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Fatal startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Required environment variable {0} is not set. \
         Please create a .env file with MAPBOX_TOKEN and GEMINI_API_KEY"
    )]
    MissingSecret(&'static str),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Map provider access token, attached to every geocoding/directions call
    pub mapbox_token: String,
    /// Map provider base URL
    pub mapbox_api_url: String,

    /// Language model API key
    pub gemini_api_key: String,
    /// Language model API base URL
    pub gemini_api_url: String,
    /// Model used for generateContent calls
    pub gemini_model: String,

    /// Directory the front-end bundle is served from
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingSecret(key))
        };

        let mapbox_token = secret(MAPBOX_TOKEN_VAR)?;
        let gemini_api_key = secret(GEMINI_API_KEY_VAR)?;

        let base_url = |key: &str, default: &str| {
            lookup(key)
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            mapbox_token,
            mapbox_api_url: base_url("MAPBOX_API_URL", DEFAULT_MAPBOX_API_URL),

            gemini_api_key,
            gemini_api_url: base_url("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),

            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| ".".to_string()),
        })
    }
}
