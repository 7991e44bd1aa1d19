use meridian_registry::Provider;
use serde_json::Value;

use super::{StreamChunkAdapter, ToolArgumentFragment, ToolNameFragment, report};
use crate::extract::{count_at, index_at, present, str_at};
use crate::types::UsageReport;

/// One `chat.completion.chunk`, or the bare choice taken from one
#[derive(Debug, Clone)]
pub struct OpenAiChunk<'a> {
    raw: &'a Value,
    choice: Option<&'a Value>,
}

impl<'a> OpenAiChunk<'a> {
    pub fn new(raw: &'a Value) -> Self {
        let choice = match raw.get("choices") {
            Some(Value::Array(choices)) => choices.first(),
            _ => Some(raw),
        };

        Self { raw, choice }
    }

    fn choice_str(&self, pointer: &str) -> Option<&'a str> {
        self.choice.and_then(|choice| str_at(choice, pointer))
    }

    /// Tool-call deltas paired with their index
    fn tool_deltas(&self) -> impl Iterator<Item = (u32, &'a Value)> + use<'a> {
        self.choice
            .and_then(|choice| choice.pointer("/delta/tool_calls"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .zip(0u32..)
            .map(|(delta, position)| (index_at(delta, "/index").unwrap_or(position), delta))
    }
}

impl StreamChunkAdapter for OpenAiChunk<'_> {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn raw(&self) -> &Value {
        self.raw
    }

    fn is_start(&self) -> bool {
        self.choice_str("/delta/role") == Some("assistant")
    }

    fn is_end(&self) -> bool {
        self.choice
            .and_then(|choice| present(choice, "/finish_reason"))
            .is_some()
    }

    fn is_tool_fragment(&self) -> bool {
        self.tool_deltas().next().is_some()
    }

    fn role(&self) -> Option<&str> {
        self.choice_str("/delta/role")
    }

    fn text_fragment(&self) -> Option<&str> {
        self.choice_str("/delta/content")
    }

    fn tool_name_fragments(&self) -> Vec<ToolNameFragment<'_>> {
        self.tool_deltas()
            .filter_map(|(index, delta)| {
                Some(ToolNameFragment {
                    index,
                    name: str_at(delta, "/function/name")?,
                    id: str_at(delta, "/id"),
                })
            })
            .collect()
    }

    fn tool_argument_fragments(&self) -> Vec<ToolArgumentFragment<'_>> {
        self.tool_deltas()
            .filter_map(|(index, delta)| {
                Some(ToolArgumentFragment {
                    index,
                    chunk: str_at(delta, "/function/arguments")?,
                })
            })
            .collect()
    }

    fn finish_reason(&self) -> Option<&str> {
        self.choice_str("/finish_reason")
    }

    fn usage(&self) -> Option<UsageReport> {
        present(self.raw, "/usage")?;
        report(
            count_at(self.raw, "/usage/prompt_tokens"),
            count_at(self.raw, "/usage/completion_tokens"),
            count_at(self.raw, "/usage/total_tokens"),
        )
    }

    fn model(&self) -> Option<&str> {
        str_at(self.raw, "/model")
    }

    fn error_message(&self) -> Option<&str> {
        let error = present(self.raw, "/error")?;
        Some(
            str_at(error, "/message")
                .or_else(|| error.as_str())
                .unwrap_or("unspecified provider error"),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn role_delta_opens_the_stream() {
        let raw = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "model": "gpt-4o-mini",
            "choices": [{"index": 0, "delta": {"role": "assistant", "content": ""}, "finish_reason": null}]
        });
        let chunk = OpenAiChunk::new(&raw);

        assert!(chunk.is_start());
        assert!(!chunk.is_end());
        assert!(!chunk.is_tool_fragment());
        assert_eq!(chunk.model(), Some("gpt-4o-mini"));
        assert_eq!(chunk.usage(), None);
    }

    #[test]
    fn finish_reason_closes_the_stream() {
        let raw = json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]});
        let chunk = OpenAiChunk::new(&raw);

        assert!(chunk.is_end());
        assert!(!chunk.is_start());
        assert_eq!(chunk.finish_reason(), Some("stop"));
        assert_eq!(chunk.text_fragment(), None);
    }

    #[test]
    fn bare_choice_is_accepted() {
        let raw = json!({"delta": {"content": "Hel"}, "finish_reason": null});
        let chunk = OpenAiChunk::new(&raw);

        assert_eq!(chunk.text_fragment(), Some("Hel"));
        assert!(!chunk.is_end());
    }

    #[test]
    fn parallel_tool_deltas_in_one_chunk() {
        let raw = json!({"choices": [{"delta": {"tool_calls": [
            {"index": 0, "id": "call_a", "type": "function", "function": {"name": "lookup", "arguments": ""}},
            {"index": 1, "function": {"arguments": "{\"tz\""}}
        ]}}]});
        let chunk = OpenAiChunk::new(&raw);

        assert!(chunk.is_tool_fragment());
        assert_eq!(
            chunk.tool_name_fragments(),
            vec![ToolNameFragment {
                index: 0,
                name: "lookup",
                id: Some("call_a")
            }]
        );
        assert_eq!(
            chunk.tool_argument_fragments(),
            vec![
                ToolArgumentFragment { index: 0, chunk: "" },
                ToolArgumentFragment {
                    index: 1,
                    chunk: "{\"tz\""
                },
            ]
        );
    }

    #[test]
    fn trailing_usage_chunk() {
        let raw = json!({
            "object": "chat.completion.chunk",
            "choices": [],
            "usage": {"prompt_tokens": 11, "completion_tokens": 4, "total_tokens": 15}
        });
        let chunk = OpenAiChunk::new(&raw);

        assert!(!chunk.is_start());
        assert!(!chunk.is_end());
        assert_eq!(chunk.text_fragment(), None);
        assert_eq!(
            chunk.usage(),
            Some(UsageReport {
                prompt_tokens: Some(11),
                completion_tokens: Some(4),
                total_tokens: Some(15),
            })
        );
    }

    #[test]
    fn error_event() {
        let raw = json!({"error": {"message": "Rate limit reached", "type": "requests"}});
        assert_eq!(OpenAiChunk::new(&raw).error_message(), Some("Rate limit reached"));
    }
}
