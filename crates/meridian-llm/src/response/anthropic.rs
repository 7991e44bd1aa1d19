use meridian_registry::{ModelCapabilityResolver, ModelInfo, Provider};
use serde_json::{Map, Value};

use super::{ResponseAdapter, listing};
use crate::extract::{count_at, str_at};
use crate::protocol::anthropic::AnthropicModel;
use crate::types::{ToolCallInvocation, Usage};

/// Messages API response or model list from Anthropic
#[derive(Debug, Clone)]
pub struct AnthropicResponse<'a> {
    raw: &'a Value,
    model_hint: Option<String>,
}

impl<'a> AnthropicResponse<'a> {
    pub fn new(raw: &'a Value, model_hint: Option<&str>) -> Self {
        Self {
            raw,
            model_hint: model_hint.map(str::to_owned),
        }
    }

    /// Custom stop sequence that ended generation, if any
    pub fn stop_sequence(&self) -> Option<&str> {
        str_at(self.raw, "/stop_sequence")
    }

    /// Stop sequence reported by the legacy text completions API
    pub fn stop(&self) -> Option<&str> {
        str_at(self.raw, "/stop")
    }

    /// Request log id reported by the legacy text completions API
    pub fn log_id(&self) -> Option<&str> {
        str_at(self.raw, "/log_id")
    }

    fn blocks_of(&self, kind: &'static str) -> impl Iterator<Item = &'a Value> + use<'a> {
        self.raw
            .get("content")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(move |block| str_at(block, "/type") == Some(kind))
    }

    fn first_text(&self) -> Option<&'a str> {
        self.blocks_of("text").find_map(|block| str_at(block, "/text"))
    }
}

impl ResponseAdapter for AnthropicResponse<'_> {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn raw(&self) -> &Value {
        self.raw
    }

    fn model(&self) -> Option<&str> {
        str_at(self.raw, "/model").or(self.model_hint.as_deref())
    }

    fn id(&self) -> Option<&str> {
        str_at(self.raw, "/id")
    }

    fn role(&self) -> Option<&str> {
        str_at(self.raw, "/role")
    }

    /// Legacy text completion, else the first text block
    fn completion_text(&self) -> Option<&str> {
        str_at(self.raw, "/completion").or_else(|| self.first_text())
    }

    fn chat_completion_text(&self) -> Option<&str> {
        self.first_text()
    }

    fn tool_calls(&self) -> Vec<ToolCallInvocation> {
        self.blocks_of("tool_use")
            .zip(0..)
            .map(|(block, index)| {
                ToolCallInvocation::from_value(
                    index,
                    str_at(block, "/id").map(str::to_owned),
                    str_at(block, "/name").unwrap_or_default().to_owned(),
                    block
                        .get("input")
                        .cloned()
                        .unwrap_or_else(|| Value::Object(Map::new())),
                )
            })
            .collect()
    }

    fn finish_reason(&self) -> Option<&str> {
        str_at(self.raw, "/stop_reason")
    }

    fn usage(&self) -> Usage {
        Usage::new(
            count_at(self.raw, "/usage/input_tokens").unwrap_or(0),
            count_at(self.raw, "/usage/output_tokens").unwrap_or(0),
            None,
        )
    }

    fn list_models_with(&self, resolver: &ModelCapabilityResolver) -> Vec<ModelInfo> {
        listing::<AnthropicModel>(self.raw, Provider::Anthropic)
            .into_iter()
            .map(|entry| {
                let mut metadata = Map::new();
                if let Some(kind) = entry.kind {
                    metadata.insert("type".to_owned(), Value::String(kind));
                }

                let info = resolver
                    .resolve(&entry.id, Provider::Anthropic)
                    .with_created_at(entry.created_at)
                    .with_metadata(metadata);

                match entry.display_name {
                    Some(name) => info.with_display_name(name),
                    None => info,
                }
            })
            .collect()
    }
}
