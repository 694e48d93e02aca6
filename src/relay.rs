use crate::config::ProviderConfig;
use crate::dispatch::http::HttpDispatch;
use crate::dispatch::payload;
use crate::dispatch::{Outcome, RequestContext, Transport};
use crate::error::RelayError;
use crate::parsers::responses;
use crate::response::{Comparison, GenerationResult};

/// One caller message plus its optional tuning knobs, as received by the `chat` tool.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub message: String,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<i64>,
}

/// Builds the payload, makes one provider call, normalizes the outcome.
pub struct ChatRelay<T = HttpDispatch> {
    transport: T,
    default_model: String,
}

impl ChatRelay<HttpDispatch> {
    pub fn from_config(provider: &ProviderConfig) -> Result<Self, RelayError> {
        Ok(Self::new(
            HttpDispatch::new(provider)?,
            provider.default_model.clone(),
        ))
    }
}

impl<T: Transport> ChatRelay<T> {
    pub fn new(transport: T, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub async fn generate_reply(&self, req: &GenerationRequest) -> GenerationResult {
        let payload = payload::build(
            &req.message,
            req.model.as_deref(),
            req.temperature,
            req.max_output_tokens,
            &self.default_model,
        );
        tracing::debug!(
            model = %payload.model,
            max_output_tokens = payload.max_output_tokens,
            temperature = ?payload.temperature,
            "dispatching to provider"
        );

        let ctx = RequestContext::new(payload.max_output_tokens);
        let outcome = self.transport.post(&payload).await;
        let result = responses::normalize(&outcome, &ctx);

        tracing::info!(
            model = %payload.model,
            outcome = outcome_kind(&outcome),
            latency_ms = result.latency_ms(),
            truncated = result.truncated(),
            "provider call finished"
        );
        result
    }

    /// Relay the same message under two settings concurrently.
    pub async fn compare(&self, a: &GenerationRequest, b: &GenerationRequest) -> Comparison {
        let (a, b) = tokio::join!(self.generate_reply(a), self.generate_reply(b));
        Comparison { a, b }
    }
}

fn outcome_kind(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Success(_) => "success",
        Outcome::HttpFailure { .. } => "http_failure",
        Outcome::TransportFailure(_) => "transport_failure",
    }
}
