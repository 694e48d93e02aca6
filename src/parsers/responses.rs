use serde_json::Value;

use crate::dispatch::{Outcome, RequestContext};
use crate::parsers::{coerce_int, is_blank, objects_in, string_form};
use crate::response::{GenerationResult, TRUNCATE_REASON_MAX_OUTPUT_TOKENS, TokenUsage};

const NO_OUTPUT_FIELD: &str = "Error: provider response has no output field.";
const EMPTY_RESPONSE: &str = "Error: provider returned an empty response.";
const NOTHING_GENERATED: &str = "Error: no response generated by the provider.";

/// Turn whatever the transport produced into a `GenerationResult`. Never fails.
pub fn normalize(outcome: &Outcome, ctx: &RequestContext) -> GenerationResult {
    let latency_ms = ctx.elapsed_ms();

    match outcome {
        Outcome::Success(json) => normalize_body(json, ctx.max_output_tokens, latency_ms),
        Outcome::HttpFailure { status, body } => {
            GenerationResult::http_failure(*status, body, latency_ms)
        }
        Outcome::TransportFailure(message) => {
            GenerationResult::transport_failure(message, latency_ms)
        }
    }
}

fn normalize_body(res: &Value, max_output_tokens: u32, latency_ms: u64) -> GenerationResult {
    if !res.is_object() {
        return GenerationResult::success(
            EMPTY_RESPONSE.to_string(),
            latency_ms,
            TokenUsage::default(),
            false,
        );
    }

    let truncated = is_truncated(res);
    let reply = extract_text(res, truncated, max_output_tokens);
    GenerationResult::success(reply, latency_ms, extract_usage(res), truncated)
}

/// Provider stopped early because it hit the output token ceiling.
pub fn is_truncated(res: &Value) -> bool {
    let incomplete = string_form(res.get("status")).is_some_and(|s| s == "incomplete");
    let reason_matches = res
        .get("incomplete_details")
        .and_then(Value::as_object)
        .and_then(|details| string_form(details.get("reason")))
        .is_some_and(|r| r == TRUNCATE_REASON_MAX_OUTPUT_TOKENS);
    incomplete && reason_matches
}

/// Reply text, or a diagnostic when the response holds none.
///
/// Precedence: first non-blank `output_text` block, then first non-blank text of
/// any type, then a truncation message naming the effective token ceiling, then
/// a status-based diagnostic.
pub fn extract_text(res: &Value, truncated: bool, max_output_tokens: u32) -> String {
    if !res.get("output").is_some_and(Value::is_array) {
        return NO_OUTPUT_FIELD.to_string();
    }

    let text = first_text(res, |ty| ty == Some("output_text")).or_else(|| first_text(res, |_| true));
    if let Some(text) = text {
        return text.to_string();
    }

    if truncated {
        return format!(
            "The response was too long and exceeded the output token limit ({max_output_tokens}). \
             Increase maxOutputTokens or ask for a shorter answer."
        );
    }

    match string_form(res.get("status")) {
        Some(status) if status != "completed" => {
            format!("Error: provider response not completed (status={status}).")
        }
        _ => NOTHING_GENERATED.to_string(),
    }
}

/// Walk `output[].content[]` in order and return the first non-blank `text`
/// whose `type` passes `accept`.
fn first_text<'a>(res: &'a Value, accept: impl Fn(Option<&str>) -> bool) -> Option<&'a str> {
    let items = res.get("output").and_then(Value::as_array)?;
    items
        .iter()
        .flat_map(|item| objects_in(item, "content"))
        .filter(|block| accept(block.get("type").and_then(Value::as_str)))
        .find_map(|block| {
            block
                .get("text")
                .and_then(Value::as_str)
                .filter(|t| !is_blank(t))
        })
}

/// Token counters from `usage`, each coerced on its own.
pub fn extract_usage(res: &Value) -> TokenUsage {
    let Some(usage) = res.get("usage").filter(|u| u.is_object()) else {
        return TokenUsage::default();
    };
    TokenUsage {
        input_tokens: coerce_int(usage.get("input_tokens")),
        output_tokens: coerce_int(usage.get("output_tokens")),
        total_tokens: coerce_int(usage.get("total_tokens")),
    }
}
