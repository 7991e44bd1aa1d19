//! Wire format types for provider model listings
//!
//! Only the listing entries are typed; completions and stream events are
//! read field by field so that schema drift in one field cannot reject a
//! whole payload. Listing entries follow the same rule: `id` is the only
//! required field and every other field that fails to narrow to its type is
//! read as absent.

pub mod anthropic;
pub mod openai;

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::extract::timestamp_of;

/// Deserialize an optional field, treating a value of the wrong type as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match T::deserialize(&value) {
        Ok(field) => Ok(Some(field)),
        Err(e) => {
            tracing::debug!(error = %e, %value, "ignoring mistyped listing field");
            Ok(None)
        }
    }
}

/// Deserialize a creation time given as RFC 3339 text or epoch seconds
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let timestamp = timestamp_of(&value);
    if timestamp.is_none() && !value.is_null() {
        tracing::debug!(%value, "ignoring unreadable listing timestamp");
    }

    Ok(timestamp)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::anthropic::AnthropicModel;
    use super::openai::OpenAiModel;

    #[test]
    fn openai_entry_survives_mistyped_fields() {
        let entry: OpenAiModel =
            serde_json::from_value(json!({"id": "gpt-4o", "object": 7, "created": 1.7e9, "owned_by": ["system"]})).unwrap();

        assert_eq!(entry.id, "gpt-4o");
        assert_eq!(entry.object, None);
        assert_eq!(entry.owned_by, None);
        assert_eq!(entry.created.map(|t| t.as_second()), Some(1_700_000_000));
    }

    #[test]
    fn anthropic_entry_survives_mistyped_fields() {
        let entry: AnthropicModel =
            serde_json::from_value(json!({"id": "claude-3-opus-20240229", "type": null, "display_name": 3, "created_at": 1_709_164_800}))
                .unwrap();

        assert_eq!(entry.kind, None);
        assert_eq!(entry.display_name, None);
        assert_eq!(entry.created_at.map(|t| t.as_second()), Some(1_709_164_800));
    }

    #[test]
    fn id_is_still_required() {
        assert!(serde_json::from_value::<OpenAiModel>(json!({"object": "model"})).is_err());
        assert!(serde_json::from_value::<AnthropicModel>(json!({"id": 42})).is_err());
    }
}
