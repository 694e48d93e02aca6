use schemars::JsonSchema;
use serde::Deserialize;

use crate::parsers::is_blank;
use crate::relay::GenerationRequest;

/// Generation settings for one side of a comparison. Every field falls back
/// the same way a plain `chat` call does.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareSettings {
    /// Provider model name. Defaults to the configured model.
    pub model: Option<String>,
    /// Sampling temperature. Ignored for gpt-5 models.
    pub temperature: Option<f64>,
    /// Output token ceiling (default 800, capped at 8000).
    #[serde(alias = "max_output_tokens")]
    pub max_output_tokens: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// The user message sent to both sides. Must not be blank.
    #[serde(default)]
    pub message: String,
    /// Settings for side A.
    pub a: Option<CompareSettings>,
    /// Settings for side B.
    pub b: Option<CompareSettings>,
}

impl CompareRequest {
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.message) {
            return Err("message must not be empty".to_string());
        }
        Ok(())
    }

    /// One relay request per side, sharing the message.
    pub fn into_requests(self) -> (GenerationRequest, GenerationRequest) {
        let side = |settings: Option<CompareSettings>| {
            let s = settings.unwrap_or_default();
            GenerationRequest {
                message: self.message.clone(),
                model: s.model,
                temperature: s.temperature,
                max_output_tokens: s.max_output_tokens,
            }
        };
        (side(self.a), side(self.b))
    }
}
