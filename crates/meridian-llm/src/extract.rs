//! Field extraction over raw provider payloads
//!
//! Paths are JSON pointers. Missing or mistyped fields come back as `None`;
//! callers decide the documented default for each field.

use jiff::Timestamp;
use serde_json::Value;

pub(crate) fn str_at<'a>(raw: &'a Value, pointer: &str) -> Option<&'a str> {
    raw.pointer(pointer).and_then(Value::as_str)
}

/// Non-null value at `pointer`
pub(crate) fn present<'a>(raw: &'a Value, pointer: &str) -> Option<&'a Value> {
    raw.pointer(pointer).filter(|value| !value.is_null())
}

pub(crate) fn index_at(raw: &Value, pointer: &str) -> Option<u32> {
    raw.pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|index| u32::try_from(index).ok())
}

/// Token counter at `pointer`, leniently coerced
///
/// Accepts integers, non-negative floats and numeric strings; anything else
/// is treated as unreported.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn count_at(raw: &Value, pointer: &str) -> Option<u64> {
    let value = present(raw, pointer)?;
    let count = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    if count.is_none() {
        tracing::debug!(field = pointer, %value, "non-numeric token count treated as zero");
    }

    count
}

/// A point in time given as RFC 3339 text or epoch seconds
///
/// Seconds may be an integer, a float or a numeric string.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn timestamp_of(value: &Value) -> Option<Timestamp> {
    let seconds = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(timestamp) = text.parse::<Timestamp>() {
                return Some(timestamp);
            }
            text.parse().ok()
        }
        _ => None,
    };

    seconds.and_then(|secs| Timestamp::from_second(secs).ok())
}

/// Entries of a model listing: a bare array or a `data` envelope
pub(crate) fn listing_entries(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map.get("data").and_then(Value::as_array),
        _ => None,
    }
}
