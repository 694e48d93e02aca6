pub mod http;
pub mod payload;

use std::time::Instant;

use crate::dispatch::payload::ProviderPayload;
use crate::error::RelayError;

/// What a single transport call produced. Transports never return `Err`;
/// every failure is folded into one of these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// HTTP 2xx with a decoded JSON body.
    Success(serde_json::Value),
    /// Non-2xx status with the raw response body.
    HttpFailure { status: u16, body: String },
    /// No HTTP response: connect error, reset, timeout, undecodable body.
    TransportFailure(String),
}

impl From<RelayError> for Outcome {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Upstream { status, body } => Self::HttpFailure { status, body },
            other => Self::TransportFailure(other.user_message()),
        }
    }
}

/// Per-call data the normalizer needs besides the outcome itself.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// Captured right before the payload is handed to the transport.
    pub dispatched_at: Instant,
    /// Effective (resolved, capped) token ceiling sent to the provider.
    pub max_output_tokens: u32,
}

impl RequestContext {
    pub fn new(max_output_tokens: u32) -> Self {
        Self {
            dispatched_at: Instant::now(),
            max_output_tokens,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.dispatched_at.elapsed().as_millis() as u64
    }
}

/// One outbound call per payload, exactly one outcome back.
pub trait Transport: Send + Sync {
    fn post(&self, payload: &ProviderPayload) -> impl Future<Output = Outcome> + Send;
}
