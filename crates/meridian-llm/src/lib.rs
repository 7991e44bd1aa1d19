//! Provider-neutral view over LLM responses
//!
//! Wraps raw `OpenAI` and Anthropic payloads behind [`ResponseAdapter`],
//! normalises individual streaming events behind [`StreamChunkAdapter`], and
//! folds a chunk sequence into one [`CanonicalMessage`] with
//! [`StreamAggregator`]. Transport, retries and deserialisation of the wire
//! bytes stay with the caller; everything here works on `serde_json::Value`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod aggregate;
pub mod chunk;
pub mod error;
mod extract;
pub mod protocol;
pub mod response;
pub mod types;

pub use aggregate::{AggregationState, StreamAggregator, ToolBuffer, aggregate, aggregate_stream};
pub use chunk::{AnthropicChunk, OpenAiChunk, StreamChunkAdapter, ToolArgumentFragment, ToolNameFragment, chunk_adapter};
pub use error::{StreamError, ToolArgumentError};
pub use meridian_registry::{ModelCapabilityResolver, ModelInfo, Provider};
pub use response::{AnthropicResponse, OpenAiResponse, ResponseAdapter, response_adapter};
pub use types::{CanonicalMessage, ChatMessage, FinishReason, ToolCallInvocation, Usage, UsageReport};
