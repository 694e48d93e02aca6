//! Response normalization over the provider's JSON envelope and failure outcomes.

use chatrelay::dispatch::{Outcome, RequestContext};
use chatrelay::parsers::responses::normalize;
use serde_json::json;

fn ok(body: serde_json::Value, max_output_tokens: u32) -> chatrelay::response::GenerationResult {
    normalize(&Outcome::Success(body), &RequestContext::new(max_output_tokens))
}

#[test]
fn completed_response_with_usage() {
    let r = ok(
        json!({
            "status": "completed",
            "output": [{"content": [{"type": "output_text", "text": "Bonjour !"}]}],
            "usage": {"input_tokens": 10, "output_tokens": 20, "total_tokens": 30}
        }),
        800,
    );
    assert_eq!(r.reply(), "Bonjour !");
    assert_eq!(r.input_tokens(), Some(10));
    assert_eq!(r.output_tokens(), Some(20));
    assert_eq!(r.total_tokens(), Some(30));
    assert!(!r.truncated());
    assert_eq!(r.truncate_reason(), None);
}

#[test]
fn output_text_wins_regardless_of_position() {
    for content in [
        json!([{"type": "output_text", "text": "Main"}, {"type": "something", "text": "Other"}]),
        json!([{"type": "something", "text": "Other"}, {"type": "output_text", "text": "Main"}]),
    ] {
        let r = ok(json!({"status": "completed", "output": [{"content": content}]}), 100);
        assert_eq!(r.reply(), "Main");
    }
}

#[test]
fn falls_back_to_any_text() {
    let r = ok(
        json!({"status": "completed", "output": [{"content": [{"type": "x", "text": "Fallback"}]}]}),
        100,
    );
    assert_eq!(r.reply(), "Fallback");
}

#[test]
fn truncated_without_text() {
    let r = ok(
        json!({
            "status": "incomplete",
            "incomplete_details": {"reason": "max_output_tokens"},
            "output": [{"content": [{"type": "output_text", "text": ""}]}]
        }),
        123,
    );
    assert!(r.truncated());
    assert_eq!(r.truncate_reason(), Some("max_output_tokens"));
    assert!(r.reply().contains("output token limit"), "{}", r.reply());
    assert!(r.reply().contains("123"), "{}", r.reply());
}

#[test]
fn truncated_with_partial_text_keeps_text() {
    let r = ok(
        json!({
            "status": "incomplete",
            "incomplete_details": {"reason": "max_output_tokens"},
            "output": [{"content": [{"type": "output_text", "text": "Start of answer..."}]}]
        }),
        200,
    );
    assert_eq!(r.reply(), "Start of answer...");
    assert!(r.truncated());
    assert_eq!(r.truncate_reason(), Some("max_output_tokens"));
}

#[test]
fn missing_output_field() {
    let r = ok(json!({"status": "completed", "usage": {"input_tokens": 1}}), 100);
    assert_eq!(r.reply(), "Error: provider response has no output field.");
}

#[test]
fn status_not_completed() {
    let r = ok(
        json!({"status": "failed", "output": [{"content": [{"type": "output_text", "text": ""}]}]}),
        100,
    );
    assert!(r.reply().contains("status=failed"), "{}", r.reply());
    assert!(!r.truncated());
}

#[test]
fn http_failure_outcome() {
    let r = normalize(
        &Outcome::HttpFailure {
            status: 400,
            body: r#"{"error":"bad request"}"#.to_string(),
        },
        &RequestContext::new(100),
    );
    assert_eq!(r.reply(), r#"Provider HTTP error 400: {"error":"bad request"}"#);
    assert_eq!(r.input_tokens(), None);
    assert_eq!(r.output_tokens(), None);
    assert_eq!(r.total_tokens(), None);
    assert!(!r.truncated());
}

#[test]
fn transport_failure_outcome() {
    let r = normalize(
        &Outcome::TransportFailure("connection reset by peer".to_string()),
        &RequestContext::new(100),
    );
    assert_eq!(r.reply(), "Error: connection reset by peer");
    assert_eq!(r.input_tokens(), None);
    assert!(!r.truncated());
    assert_eq!(r.truncate_reason(), None);
}

#[test]
fn latency_measured_from_dispatch() {
    let ctx = RequestContext::new(100);
    std::thread::sleep(std::time::Duration::from_millis(20));
    let r = normalize(&Outcome::TransportFailure("late".into()), &ctx);
    assert!(r.latency_ms() >= 20, "latency {}", r.latency_ms());
}

#[test]
fn normalize_is_deterministic_apart_from_latency() {
    let outcome = Outcome::Success(json!({
        "status": "incomplete",
        "incomplete_details": {"reason": "max_output_tokens"},
        "output": [{"content": [{"type": "reasoning", "text": "draft"}]}],
        "usage": {"input_tokens": "5", "output_tokens": 7, "total_tokens": 12}
    }));
    let ctx = RequestContext::new(64);
    let a = normalize(&outcome, &ctx);
    let b = normalize(&outcome, &ctx);
    assert_eq!(a.reply(), b.reply());
    assert_eq!(a.usage(), b.usage());
    assert_eq!(a.truncated(), b.truncated());
    assert_eq!(a.truncate_reason(), b.truncate_reason());
}
