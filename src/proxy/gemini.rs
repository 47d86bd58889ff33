//! Gemini proxy
//!
//! Builds generateContent request bodies and forwards them with the
//! server-held API key. Two shapes exist: plain text completion, and
//! structured extraction of route information through a single function
//! declaration.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::{config::Config, error::AppResult, proxy::relay_json};

const PROVIDER: &str = "Gemini";

/// Sampling temperature for structured extraction
pub const EXTRACTION_TEMPERATURE: f64 = 0.1;

/// Name of the route extraction function declaration
pub const EXTRACTION_FUNCTION_NAME: &str = "extractRouteInfo";

/// Transport modes the extraction schema accepts
pub const TRANSPORT_MODES: [&str; 4] = ["driving", "walking", "cycling", "transit"];

/// generateContent request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,
}

impl GenerateContentRequest {
    /// Plain completion: the prompt as the only content, no tools, no
    /// generation overrides
    pub fn plain(prompt: &str) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            tools: None,
            generation_config: None,
        }
    }

    /// Structured extraction of locations and routing preferences
    pub fn route_extraction(prompt: &str) -> Self {
        Self {
            contents: vec![Content::text(format!(
                "Extract routing information from this text: \"{}\"",
                prompt
            ))],
            tools: Some(vec![Tool {
                function_declarations: vec![route_extraction_declaration()],
            }]),
            generation_config: Some(GenerationConfig {
                temperature: EXTRACTION_TEMPERATURE,
            }),
        }
    }

    pub fn for_prompt(prompt: &str, function_calling: bool) -> Self {
        if function_calling {
            Self::route_extraction(prompt)
        } else {
            Self::plain(prompt)
        }
    }
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Declaration of `extractRouteInfo`: an ordered list of locations (required)
/// plus optional travel preferences.
pub fn route_extraction_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: EXTRACTION_FUNCTION_NAME.to_string(),
        description: "Extract locations and routing preferences from natural language".to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "locations": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of locations mentioned in order of travel"
                },
                "preferences": {
                    "type": "OBJECT",
                    "properties": {
                        "transportMode": {
                            "type": "STRING",
                            "enum": TRANSPORT_MODES,
                            "description": "Mode of transportation"
                        },
                        "avoidTolls": {
                            "type": "BOOLEAN",
                            "description": "Whether to avoid toll roads"
                        },
                        "avoidHighways": {
                            "type": "BOOLEAN",
                            "description": "Whether to avoid highways"
                        },
                        "avoidFerries": {
                            "type": "BOOLEAN",
                            "description": "Whether to avoid ferries"
                        }
                    }
                }
            },
            "required": ["locations"]
        }),
    }
}

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.gemini_api_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    /// Run generateContent for a prompt
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate_content(&self, prompt: &str, function_calling: bool) -> AppResult<Value> {
        let body = GenerateContentRequest::for_prompt(prompt, function_calling);
        debug!(function_calling, "Forwarding generateContent request");

        relay_json(PROVIDER, self.client.post(self.generate_url()).json(&body)).await
    }

    /// Full generateContent URL including the API key
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }
}
