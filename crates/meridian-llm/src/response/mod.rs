//! Accessors over one complete provider response

mod anthropic;
mod openai;

use jiff::Timestamp;
use meridian_registry::{ModelCapabilityResolver, ModelInfo, Provider};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::extract::listing_entries;
use crate::types::{CanonicalMessage, ChatMessage, DEFAULT_ROLE, FinishReason, ToolCallInvocation, Usage};

pub use anthropic::AnthropicResponse;
pub use openai::OpenAiResponse;

/// Canonical accessors over a raw response payload
///
/// Accessors never fail. A field the payload lacks comes back as `None`, an
/// empty sequence or a zero counter.
pub trait ResponseAdapter {
    /// Vendor whose wire format this adapter reads
    fn provider(&self) -> Provider;

    /// The payload as received
    fn raw(&self) -> &Value;

    /// Reported model id, else the hint given at construction
    fn model(&self) -> Option<&str>;

    /// Provider-assigned response id
    fn id(&self) -> Option<&str>;

    /// Role of the generated message
    fn role(&self) -> Option<&str>;

    /// Generated text of the first candidate
    fn completion_text(&self) -> Option<&str>;

    /// Chat message text of the first candidate
    fn chat_completion_text(&self) -> Option<&str>;

    /// One entry per requested tool invocation, in payload order
    fn tool_calls(&self) -> Vec<ToolCallInvocation>;

    /// Provider finish string
    fn finish_reason(&self) -> Option<&str>;

    /// Token usage with missing counters as zero
    fn usage(&self) -> Usage;

    /// Models in a listing payload, resolved through `resolver`
    ///
    /// Empty when the payload is not a listing.
    fn list_models_with(&self, resolver: &ModelCapabilityResolver) -> Vec<ModelInfo>;

    /// Creation time of the response
    fn created_at(&self) -> Option<Timestamp> {
        None
    }

    /// Vectors of an embeddings payload
    fn embeddings(&self) -> Vec<Vec<f64>> {
        Vec::new()
    }

    /// First vector of an embeddings payload
    fn embedding(&self) -> Option<Vec<f64>> {
        self.embeddings().into_iter().next()
    }

    /// Models in a listing payload, resolved against the built-in tables
    fn list_models(&self) -> Vec<ModelInfo> {
        self.list_models_with(ModelCapabilityResolver::builtin())
    }

    /// Ids of the listed models
    fn model_ids(&self) -> Vec<String> {
        self.list_models().into_iter().map(|model| model.id).collect()
    }

    /// Creation times of the listed models
    fn created_dates(&self) -> Vec<Option<Timestamp>> {
        self.list_models().into_iter().map(|model| model.created_at).collect()
    }

    /// Display names of the listed models
    fn display_names(&self) -> Vec<String> {
        self.list_models().into_iter().map(|model| model.display_name).collect()
    }

    fn chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role().unwrap_or(DEFAULT_ROLE).to_owned(),
            content: self.chat_completion_text().map(str::to_owned),
        }
    }

    fn finish_kind(&self) -> Option<FinishReason> {
        self.finish_reason().and_then(FinishReason::from_provider)
    }

    /// The response in the shape the stream aggregator produces
    fn to_message(&self) -> CanonicalMessage {
        CanonicalMessage {
            role: self.role().unwrap_or(DEFAULT_ROLE).to_owned(),
            content: self
                .chat_completion_text()
                .or_else(|| self.completion_text())
                .unwrap_or_default()
                .to_owned(),
            tool_calls: self.tool_calls(),
            finish_reason: self.finish_reason().map(str::to_owned),
            usage: Some(self.usage()),
        }
    }
}

/// Wrap a raw payload in the adapter for `provider`
pub fn response_adapter<'a>(
    provider: Provider,
    raw: &'a Value,
    model_hint: Option<&str>,
) -> Box<dyn ResponseAdapter + 'a> {
    match provider {
        Provider::OpenAi => Box::new(OpenAiResponse::new(raw, model_hint)),
        Provider::Anthropic => Box::new(AnthropicResponse::new(raw, model_hint)),
    }
}

/// Typed entries of a listing payload, skipping entries that do not fit
fn listing<T: DeserializeOwned>(raw: &Value, provider: Provider) -> Vec<T> {
    let Some(entries) = listing_entries(raw) else {
        tracing::debug!(%provider, "payload is not a model listing");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match T::deserialize(entry) {
            Ok(model) => Some(model),
            Err(e) => {
                tracing::debug!(%provider, error = %e, "skipping model listing entry");
                None
            }
        })
        .collect()
}
