use meridian_registry::Provider;
use serde_json::Value;

use super::{StreamChunkAdapter, ToolArgumentFragment, ToolNameFragment, report};
use crate::extract::{count_at, index_at, str_at};
use crate::types::UsageReport;

/// One Messages API server-sent event
#[derive(Debug, Clone)]
pub struct AnthropicChunk<'a> {
    raw: &'a Value,
}

impl<'a> AnthropicChunk<'a> {
    pub const fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    fn event_type(&self) -> Option<&'a str> {
        str_at(self.raw, "/type")
    }

    fn opens_tool_block(&self) -> bool {
        str_at(self.raw, "/content_block/type") == Some("tool_use")
    }

    fn carries_tool_input(&self) -> bool {
        str_at(self.raw, "/delta/type") == Some("input_json_delta")
    }

    /// Content block the event belongs to; a lone tool call sits at zero
    fn block_index(&self) -> u32 {
        index_at(self.raw, "/index").unwrap_or(0)
    }
}

impl StreamChunkAdapter for AnthropicChunk<'_> {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn raw(&self) -> &Value {
        self.raw
    }

    fn is_start(&self) -> bool {
        self.event_type() == Some("message_start")
    }

    fn is_end(&self) -> bool {
        self.event_type() == Some("message_stop")
    }

    fn is_tool_fragment(&self) -> bool {
        self.opens_tool_block() || self.carries_tool_input()
    }

    fn role(&self) -> Option<&str> {
        str_at(self.raw, "/message/role")
    }

    fn text_fragment(&self) -> Option<&str> {
        str_at(self.raw, "/delta/text")
    }

    fn tool_name_fragments(&self) -> Vec<ToolNameFragment<'_>> {
        if !self.opens_tool_block() {
            return Vec::new();
        }

        vec![ToolNameFragment {
            index: self.block_index(),
            name: str_at(self.raw, "/content_block/name").unwrap_or_default(),
            id: str_at(self.raw, "/content_block/id"),
        }]
    }

    fn tool_argument_fragments(&self) -> Vec<ToolArgumentFragment<'_>> {
        if !self.carries_tool_input() {
            return Vec::new();
        }

        str_at(self.raw, "/delta/partial_json")
            .map(|chunk| ToolArgumentFragment {
                index: self.block_index(),
                chunk,
            })
            .into_iter()
            .collect()
    }

    fn finish_reason(&self) -> Option<&str> {
        str_at(self.raw, "/delta/stop_reason")
    }

    /// Input tokens arrive on `message_start`, output tokens on `message_delta`
    fn usage(&self) -> Option<UsageReport> {
        let base = if self.is_start() { "/message/usage" } else { "/usage" };
        report(
            count_at(self.raw, &format!("{base}/input_tokens")),
            count_at(self.raw, &format!("{base}/output_tokens")),
            None,
        )
    }

    fn model(&self) -> Option<&str> {
        str_at(self.raw, "/message/model")
    }

    fn error_message(&self) -> Option<&str> {
        if self.event_type() != Some("error") {
            return None;
        }

        Some(str_at(self.raw, "/error/message").unwrap_or("unspecified provider error"))
    }
}
