//! Timestamp normalization for API payloads.
//!
//! Zoom mixes timestamp spellings across endpoints (`...Z`, explicit
//! offsets, and occasionally naive date-times), and the upstream SDK
//! has been seen leaking an unserialized local-zone object as the
//! literal string `tzlocal()`. Before a payload is handed back to the
//! agent host, every temporal value is rewritten to one canonical
//! textual form so callers never have to branch on the spelling.

use chrono::{DateTime, Local, NaiveDateTime, Offset};
use serde_json::Value;

/// Marker left behind when a local-timezone object escapes
/// serialization upstream.
const LOCAL_TZ_MARKER: &str = "tzlocal()";

/// Recursively rewrite temporal values in a JSON payload.
///
/// - Strings parseable as RFC 3339 date-times, or as naive
///   `YYYY-MM-DDTHH:MM:SS` (assumed UTC), become canonical RFC 3339.
/// - The literal `tzlocal()` marker becomes `UTC±HH:MM` derived from
///   the process-local offset at call time.
/// - Objects keep their keys, arrays keep order and length, all other
///   scalars pass through unchanged.
///
/// The function is idempotent: canonical RFC 3339 re-normalizes to
/// itself, and `UTC±HH:MM` matches neither rule, so a second pass is
/// a no-op.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, normalize(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::String(text) => Value::String(normalize_string(text)),
        other => other,
    }
}

fn normalize_string(text: String) -> String {
    if text == LOCAL_TZ_MARKER {
        return local_utc_offset();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
        return parsed.to_rfc3339();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S") {
        return naive.and_utc().to_rfc3339();
    }

    text
}

/// Render the current process-local UTC offset as `UTC±HH:MM`.
pub fn local_utc_offset() -> String {
    let offset = Local::now().offset().fix();
    let total_minutes = offset.local_minus_utc() / 60;
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let minutes = total_minutes.abs();
    format!("UTC{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}
