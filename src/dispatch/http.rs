use std::time::Duration;

use reqwest::Client;

use crate::config::ProviderConfig;
use crate::dispatch::payload::ProviderPayload;
use crate::dispatch::{Outcome, Transport};
use crate::error::RelayError;

const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Default bound on one provider call, connect to last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HttpDispatch {
    client: Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpDispatch {
    pub fn new(provider: &ProviderConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            client,
            api_url: provider.api_url.clone(),
            api_key: provider.api_key.clone(),
            timeout: provider.timeout,
        })
    }

    async fn send(&self, payload: &ProviderPayload) -> Result<serde_json::Value, RelayError> {
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| classify(e, timeout_ms))?;

        let status = response.status();

        // Cap body reads to MAX_RESPONSE_BYTES to prevent memory exhaustion
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify(e, timeout_ms))?;
        let capped = &bytes[..bytes.len().min(MAX_RESPONSE_BYTES)];

        if !status.is_success() {
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(capped).into_owned(),
            });
        }

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(RelayError::SchemaParse(format!(
                "response too large: {} bytes (max {MAX_RESPONSE_BYTES})",
                bytes.len()
            )));
        }

        serde_json::from_slice(capped).map_err(|e| RelayError::SchemaParse(e.to_string()))
    }
}

impl Transport for HttpDispatch {
    async fn post(&self, payload: &ProviderPayload) -> Outcome {
        match self.send(payload).await {
            Ok(json) => Outcome::Success(json),
            Err(e) => {
                tracing::warn!(model = %payload.model, "provider call failed: {e}");
                Outcome::from(e)
            }
        }
    }
}

fn classify(e: reqwest::Error, timeout_ms: u64) -> RelayError {
    if e.is_timeout() {
        RelayError::Timeout(timeout_ms)
    } else {
        RelayError::Request(e)
    }
}
