use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::{FinishReason, Usage};
use crate::error::ToolArgumentError;

/// Role assumed when a provider does not announce one
pub(crate) const DEFAULT_ROLE: &str = "assistant";

/// Role plus text, the structured chat view of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A tool invocation requested by the model
///
/// Serialized flat: parsed arguments under `arguments`, or the parse
/// failure under `arguments_error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ToolCallRecord", from = "ToolCallRecord")]
pub struct ToolCallInvocation {
    /// Position of the call within its response
    pub index: u32,
    /// Provider-assigned call id, when sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Function name
    pub name: String,
    /// Arguments exactly as the provider produced them
    pub arguments_raw: String,
    /// Parsed arguments, or why they could not be parsed
    pub arguments: Result<Value, ToolArgumentError>,
}

impl ToolCallInvocation {
    /// Build an invocation from accumulated argument text
    ///
    /// Empty or whitespace-only text stands for an empty argument object.
    pub fn from_raw(index: u32, id: Option<String>, name: String, arguments_raw: String) -> Self {
        let arguments = if arguments_raw.trim().is_empty() {
            Ok(Value::Object(serde_json::Map::new()))
        } else {
            serde_json::from_str(&arguments_raw).map_err(ToolArgumentError::from)
        };

        Self {
            index,
            id,
            name,
            arguments_raw,
            arguments,
        }
    }

    /// Build an invocation from arguments the provider already structured
    pub fn from_value(index: u32, id: Option<String>, name: String, arguments: Value) -> Self {
        Self {
            index,
            id,
            name,
            arguments_raw: arguments.to_string(),
            arguments: Ok(arguments),
        }
    }

    /// Whether the arguments parsed
    pub const fn has_valid_arguments(&self) -> bool {
        self.arguments.is_ok()
    }
}

#[derive(Serialize, Deserialize)]
struct ToolCallRecord {
    index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    arguments_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments_error: Option<String>,
}

impl From<ToolCallInvocation> for ToolCallRecord {
    fn from(call: ToolCallInvocation) -> Self {
        let (arguments, arguments_error) = match call.arguments {
            Ok(arguments) => (Some(arguments), None),
            Err(e) => (None, Some(e.message)),
        };

        Self {
            index: call.index,
            id: call.id,
            name: call.name,
            arguments_raw: call.arguments_raw,
            arguments,
            arguments_error,
        }
    }
}

impl From<ToolCallRecord> for ToolCallInvocation {
    fn from(record: ToolCallRecord) -> Self {
        match (record.arguments_error, record.arguments) {
            (Some(message), _) => Self {
                index: record.index,
                id: record.id,
                name: record.name,
                arguments_raw: record.arguments_raw,
                arguments: Err(ToolArgumentError { message }),
            },
            (None, Some(arguments)) => Self {
                index: record.index,
                id: record.id,
                name: record.name,
                arguments_raw: record.arguments_raw,
                arguments: Ok(arguments),
            },
            // Only the raw text was kept
            (None, None) => Self::from_raw(record.index, record.id, record.name, record.arguments_raw),
        }
    }
}

/// Provider-neutral result of one response, complete or streamed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallInvocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CanonicalMessage {
    /// Finish reason in the shared vocabulary
    pub fn finish_kind(&self) -> Option<FinishReason> {
        self.finish_reason.as_deref().and_then(FinishReason::from_provider)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_accumulated_arguments() {
        let call = ToolCallInvocation::from_raw(0, None, "lookup".to_owned(), r#"{"q":"rome"}"#.to_owned());
        assert_eq!(call.arguments, Ok(json!({"q": "rome"})));
    }

    #[test]
    fn blank_arguments_are_an_empty_object() {
        let call = ToolCallInvocation::from_raw(0, None, "now".to_owned(), "  ".to_owned());
        assert_eq!(call.arguments, Ok(json!({})));
        assert_eq!(call.arguments_raw, "  ");
    }

    #[test]
    fn serializes_arguments_flat() {
        let ok = ToolCallInvocation::from_raw(0, Some("call_a".to_owned()), "lookup".to_owned(), r#"{"q":"rome"}"#.to_owned());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"index": 0, "id": "call_a", "name": "lookup", "arguments_raw": "{\"q\":\"rome\"}", "arguments": {"q": "rome"}})
        );

        let bad = ToolCallInvocation::from_raw(1, None, "lookup".to_owned(), r#"{"q":"ro"#.to_owned());
        let value = serde_json::to_value(&bad).unwrap();
        assert!(value.get("arguments").is_none());
        assert!(value["arguments_error"].as_str().is_some_and(|e| !e.is_empty()));
        assert_eq!(serde_json::from_value::<ToolCallInvocation>(value).unwrap(), bad);
    }

    #[test]
    fn raw_only_record_is_parsed_on_read() {
        let call: ToolCallInvocation =
            serde_json::from_value(json!({"index": 2, "name": "now", "arguments_raw": "{\"tz\":\"UTC\"}"})).unwrap();
        assert_eq!(call.arguments, Ok(json!({"tz": "UTC"})));
    }

    #[test]
    fn truncated_arguments_carry_an_error() {
        let call = ToolCallInvocation::from_raw(1, None, "lookup".to_owned(), r#"{"q":"ro"#.to_owned());
        assert!(!call.has_valid_arguments());
        assert_eq!(call.arguments_raw, r#"{"q":"ro"#);
    }
}
