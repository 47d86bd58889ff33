//! Content generation endpoint
//!
//! `POST /api/gemini` with `{ "prompt": "...", "functionCalling": true }`.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Generation request from the front-end.
///
/// Both fields are kept as raw JSON and read by truthiness, so a flag of
/// `null`, `"yes"` or `1` never makes the body undecodable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    /// Switches to structured route extraction when truthy
    #[serde(default)]
    pub function_calling: Option<Value>,
}

impl GenerateRequest {
    /// Prompt text, if the prompt is present and truthy. Strings are used
    /// as-is; other truthy values are sent as their JSON text.
    pub fn prompt(&self) -> Option<String> {
        match self.prompt.as_ref().filter(|p| is_truthy(p))? {
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn function_calling(&self) -> bool {
        self.function_calling.as_ref().is_some_and(is_truthy)
    }
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Generate content for a prompt.
///
/// A body that is missing or is not a JSON object is treated as `{}`, so it
/// is rejected for lacking a prompt rather than with a decoding error.
pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<GenerateRequest>>,
) -> AppResult<Json<Value>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let Some(prompt) = request.prompt() else {
        warn!("Rejecting generation request without prompt");
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    };
    let function_calling = request.function_calling();

    info!(
        function_calling,
        prompt_len = prompt.len(),
        "Processing generation request"
    );

    let data = state
        .gemini
        .generate_content(&prompt, function_calling)
        .await?;
    Ok(Json(data))
}
