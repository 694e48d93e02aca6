use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Sentinel carried in `truncate_reason` when the provider stopped at the token ceiling.
pub const TRUNCATE_REASON_MAX_OUTPUT_TOKENS: &str = "max_output_tokens";

/// Token counters as reported by the provider. Each field is read independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: Option<i64>,
    pub output_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
}

/// Normalized result of one relayed chat message.
///
/// Fields are private: the only way to build one is through the factory for
/// the outcome class, which keeps `reply` populated, leaves usage empty on
/// failures and ties `truncate_reason` to `truncated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    reply: String,
    latency_ms: u64,
    input_tokens: Option<i64>,
    output_tokens: Option<i64>,
    total_tokens: Option<i64>,
    truncated: bool,
    truncate_reason: Option<&'static str>,
}

impl GenerationResult {
    /// Provider answered with HTTP 2xx. `reply` is either text or a diagnostic.
    pub fn success(reply: String, latency_ms: u64, usage: TokenUsage, truncated: bool) -> Self {
        Self {
            reply: non_empty(reply),
            latency_ms,
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.total_tokens,
            truncated,
            truncate_reason: truncated.then_some(TRUNCATE_REASON_MAX_OUTPUT_TOKENS),
        }
    }

    /// Provider answered with a non-2xx status. The raw body is kept verbatim.
    pub fn http_failure(status: u16, body: &str, latency_ms: u64) -> Self {
        Self::failure(format!("Provider HTTP error {status}: {body}"), latency_ms)
    }

    /// The call never produced an HTTP response (connect error, reset, timeout).
    pub fn transport_failure(message: &str, latency_ms: u64) -> Self {
        Self::failure(format!("Error: {message}"), latency_ms)
    }

    fn failure(reply: String, latency_ms: u64) -> Self {
        Self {
            reply,
            latency_ms,
            input_tokens: None,
            output_tokens: None,
            total_tokens: None,
            truncated: false,
            truncate_reason: None,
        }
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    pub fn input_tokens(&self) -> Option<i64> {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> Option<i64> {
        self.output_tokens
    }

    pub fn total_tokens(&self) -> Option<i64> {
        self.total_tokens
    }

    pub fn usage(&self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            total_tokens: self.total_tokens,
        }
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn truncate_reason(&self) -> Option<&'static str> {
        self.truncate_reason
    }

    /// Convert to MCP CallToolResult.
    /// Always a tool-level success: failures are described by `reply`, not by the transport.
    pub fn into_call_tool_result(self) -> CallToolResult {
        match serde_json::to_string(&self) {
            Ok(json) => CallToolResult::success(vec![Content::text(json)]),
            Err(e) => {
                let escaped = e.to_string().replace('\\', "\\\\").replace('"', "\\\"");
                CallToolResult::success(vec![Content::text(format!(
                    r#"{{"reply":"Error: serialization failed: {escaped}","latencyMs":{},"inputTokens":null,"outputTokens":null,"totalTokens":null,"truncated":false,"truncateReason":null}}"#,
                    self.latency_ms
                ))])
            }
        }
    }
}

/// Results of one message relayed under two settings. Each side stands alone:
/// a failure on one never touches the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub a: GenerationResult,
    pub b: GenerationResult,
}

impl Comparison {
    pub fn into_call_tool_result(self) -> CallToolResult {
        match serde_json::to_string(&self) {
            Ok(json) => CallToolResult::success(vec![Content::text(json)]),
            Err(e) => {
                let escaped = e.to_string().replace('\\', "\\\\").replace('"', "\\\"");
                CallToolResult::success(vec![Content::text(format!(
                    r#"{{"a":null,"b":null,"error":"serialization failed: {escaped}"}}"#
                ))])
            }
        }
    }
}

fn non_empty(reply: String) -> String {
    if reply.is_empty() {
        "Error: no response generated by the provider.".to_string()
    } else {
        reply
    }
}
