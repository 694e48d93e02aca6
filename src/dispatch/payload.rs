use serde::Serialize;

/// Token ceiling used when the caller gives none, or a value below 1.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

/// Hard ceiling applied to every resolved token value, defaults included.
pub const HARD_MAX_OUTPUT_TOKENS: u32 = 8000;

/// Model-name prefix (case-insensitive) of models that reject `temperature`.
const NO_TEMPERATURE_PREFIX: &str = "gpt-5";

/// Body of `POST /v1/responses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderPayload {
    pub model: String,
    pub input: String,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Build the provider payload from loosely-specified caller parameters.
pub fn build(
    message: &str,
    requested_model: Option<&str>,
    requested_temperature: Option<f64>,
    requested_max_tokens: Option<i64>,
    default_model: &str,
) -> ProviderPayload {
    let model = resolve_model(requested_model, default_model).to_string();
    let max_output_tokens = resolve_max_output_tokens(requested_max_tokens);
    let temperature = requested_temperature.filter(|_| supports_temperature(&model));

    ProviderPayload {
        model,
        input: message.to_string(),
        max_output_tokens,
        temperature,
    }
}

pub fn resolve_model<'a>(requested: Option<&'a str>, default_model: &'a str) -> &'a str {
    requested
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default_model)
}

pub fn resolve_max_output_tokens(requested: Option<i64>) -> u32 {
    let candidate = match requested {
        Some(n) if n >= 1 => n,
        _ => i64::from(DEFAULT_MAX_OUTPUT_TOKENS),
    };
    candidate.min(i64::from(HARD_MAX_OUTPUT_TOKENS)) as u32
}

/// The only model-capability rule in the crate: everything accepts
/// `temperature` except the gpt-5 family. A plain prefix test, not a registry.
pub fn supports_temperature(model: &str) -> bool {
    !model.to_lowercase().starts_with(NO_TEMPERATURE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpt5_drops_temperature() {
        let p = build("hi", Some("gpt-5-mini"), Some(0.9), Some(100), "gpt-4.1-mini");
        assert_eq!(p.temperature, None);
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("temperature").is_none());
    }

    #[test]
    fn gpt5_prefix_is_case_insensitive() {
        assert!(!supports_temperature("GPT-5"));
        assert!(!supports_temperature("Gpt-5-nano"));
        assert!(supports_temperature("gpt-4.1-mini"));
        assert!(supports_temperature("o3-gpt-5"));
    }

    #[test]
    fn temperature_kept_for_other_models() {
        let p = build("hi", Some("gpt-4.1-mini"), Some(0.7), None, "gpt-5");
        assert_eq!(p.temperature, Some(0.7));
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["temperature"], 0.7);
    }

    #[test]
    fn absent_temperature_is_absent_key() {
        let p = build("hi", None, None, None, "gpt-4.1-mini");
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("temperature").is_none());
    }

    #[test]
    fn default_model_used_when_blank() {
        assert_eq!(resolve_model(None, "gpt-4.1-mini"), "gpt-4.1-mini");
        assert_eq!(resolve_model(Some("   "), "gpt-4.1-mini"), "gpt-4.1-mini");
        assert_eq!(resolve_model(Some("o4-mini"), "gpt-4.1-mini"), "o4-mini");
    }

    #[test]
    fn default_model_capability_decides_temperature() {
        let p = build("hi", Some(""), Some(0.2), None, "gpt-5-mini");
        assert_eq!(p.model, "gpt-5-mini");
        assert_eq!(p.temperature, None);
    }

    #[test]
    fn max_tokens_defaults_and_caps() {
        assert_eq!(resolve_max_output_tokens(None), 800);
        assert_eq!(resolve_max_output_tokens(Some(0)), 800);
        assert_eq!(resolve_max_output_tokens(Some(-5)), 800);
        assert_eq!(resolve_max_output_tokens(Some(1)), 1);
        assert_eq!(resolve_max_output_tokens(Some(8000)), 8000);
        assert_eq!(resolve_max_output_tokens(Some(999_999)), 8000);
        assert_eq!(resolve_max_output_tokens(Some(i64::MAX)), 8000);
    }

    #[test]
    fn wire_keys() {
        let p = build("Salut", None, Some(0.7), None, "gpt-4.1-mini");
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["model"], "gpt-4.1-mini");
        assert_eq!(v["input"], "Salut");
        assert_eq!(v["max_output_tokens"], 800);
        assert_eq!(v.as_object().unwrap().len(), 4);
    }
}
