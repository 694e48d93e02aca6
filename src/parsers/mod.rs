pub mod responses;

use std::borrow::Cow;

use serde_json::Value;

/// Iterate the objects of `value[key]`. Anything that is not an array yields
/// nothing; non-object elements are skipped.
pub(crate) fn objects_in<'a>(
    value: &'a Value,
    key: &str,
) -> impl Iterator<Item = &'a serde_json::Map<String, Value>> + 'a {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// String form of a scalar field: strings as-is, other non-null values as their
/// JSON text. `None` for absent or `null`.
pub(crate) fn string_form(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Lenient integer read: any JSON number (floats truncated toward zero), or a
/// string holding an integer. Everything else is absent.
pub(crate) fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Blank in the Java `String::isBlank` sense: every char is whitespace, where
/// the no-break spaces (U+00A0, U+2007, U+202F) and NEL are not whitespace but
/// the information separators U+001C..=U+001F are.
pub(crate) fn is_blank(s: &str) -> bool {
    s.chars().all(|c| match c {
        '\u{1C}'..='\u{1F}' => true,
        '\u{A0}' | '\u{2007}' | '\u{202F}' | '\u{85}' => false,
        c => c.is_whitespace(),
    })
}
