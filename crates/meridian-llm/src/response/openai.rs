use jiff::Timestamp;
use meridian_registry::{ModelCapabilityResolver, ModelInfo, Provider};
use serde_json::{Map, Value};

use super::{ResponseAdapter, listing};
use crate::extract::{count_at, index_at, listing_entries, str_at, timestamp_of};
use crate::protocol::openai::OpenAiModel;
use crate::types::{ToolCallInvocation, Usage};

/// Chat completion, legacy completion, embeddings or model list from `OpenAI`
#[derive(Debug, Clone)]
pub struct OpenAiResponse<'a> {
    raw: &'a Value,
    model_hint: Option<String>,
}

impl<'a> OpenAiResponse<'a> {
    pub fn new(raw: &'a Value, model_hint: Option<&str>) -> Self {
        Self {
            raw,
            model_hint: model_hint.map(str::to_owned),
        }
    }

    fn tool_call(position: usize, call: &Value) -> ToolCallInvocation {
        let index = index_at(call, "/index").unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
        let id = str_at(call, "/id").map(str::to_owned);
        let name = str_at(call, "/function/name").unwrap_or_default().to_owned();

        match call.pointer("/function/arguments") {
            Some(Value::String(arguments)) => ToolCallInvocation::from_raw(index, id, name, arguments.clone()),
            // Some compatible servers send arguments already decoded
            Some(arguments @ Value::Object(_)) => ToolCallInvocation::from_value(index, id, name, arguments.clone()),
            _ => ToolCallInvocation::from_raw(index, id, name, String::new()),
        }
    }
}

impl ResponseAdapter for OpenAiResponse<'_> {
    fn provider(&self) -> Provider {
        Provider::OpenAi
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
        str_at(self.raw, "/choices/0/message/role")
    }

    fn completion_text(&self) -> Option<&str> {
        self.chat_completion_text()
            .or_else(|| str_at(self.raw, "/choices/0/text"))
    }

    fn chat_completion_text(&self) -> Option<&str> {
        str_at(self.raw, "/choices/0/message/content")
    }

    fn tool_calls(&self) -> Vec<ToolCallInvocation> {
        self.raw
            .pointer("/choices/0/message/tool_calls")
            .and_then(Value::as_array)
            .map(|calls| {
                calls
                    .iter()
                    .enumerate()
                    .map(|(position, call)| Self::tool_call(position, call))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<&str> {
        str_at(self.raw, "/choices/0/finish_reason")
    }

    fn usage(&self) -> Usage {
        Usage::new(
            count_at(self.raw, "/usage/prompt_tokens").unwrap_or(0),
            count_at(self.raw, "/usage/completion_tokens").unwrap_or(0),
            count_at(self.raw, "/usage/total_tokens"),
        )
    }

    fn list_models_with(&self, resolver: &ModelCapabilityResolver) -> Vec<ModelInfo> {
        listing::<OpenAiModel>(self.raw, Provider::OpenAi)
            .into_iter()
            .map(|entry| {
                let mut metadata = Map::new();
                if let Some(object) = entry.object {
                    metadata.insert("object".to_owned(), Value::String(object));
                }
                if let Some(owner) = entry.owned_by {
                    metadata.insert("owned_by".to_owned(), Value::String(owner));
                }

                resolver
                    .resolve(&entry.id, Provider::OpenAi)
                    .with_created_at(entry.created)
                    .with_metadata(metadata)
            })
            .collect()
    }

    fn created_at(&self) -> Option<Timestamp> {
        self.raw.get("created").and_then(timestamp_of)
    }

    fn embeddings(&self) -> Vec<Vec<f64>> {
        listing_entries(self.raw)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.get("embedding").and_then(Value::as_array))
            .map(|vector| vector.iter().filter_map(Value::as_f64).collect())
            .collect()
    }
}
