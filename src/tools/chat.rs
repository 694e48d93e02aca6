use schemars::JsonSchema;
use serde::Deserialize;

use crate::parsers::is_blank;
use crate::relay::GenerationRequest;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user message relayed to the provider. Must not be blank.
    #[serde(default)]
    pub message: String,
    /// Provider model name (e.g. "gpt-4.1-mini", "gpt-5-mini"). Defaults to the configured model.
    pub model: Option<String>,
    /// Sampling temperature. Ignored for gpt-5 models, which do not accept it.
    pub temperature: Option<f64>,
    /// Output token ceiling. Values below 1 fall back to 800; anything above 8000 is capped.
    #[serde(alias = "max_output_tokens")]
    pub max_output_tokens: Option<i64>,
}

impl ChatRequest {
    /// Reject requests the relay must never see.
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.message) {
            return Err("message must not be empty".to_string());
        }
        Ok(())
    }
}

impl From<ChatRequest> for GenerationRequest {
    fn from(req: ChatRequest) -> Self {
        Self {
            message: req.message,
            model: req.model,
            temperature: req.temperature,
            max_output_tokens: req.max_output_tokens,
        }
    }
}
