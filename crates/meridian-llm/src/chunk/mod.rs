//! Normalised view of one streaming event
//!
//! `OpenAI` indexes every tool-call delta inside a chunk and may interleave
//! parallel calls; Anthropic sends one unindexed fragment per event and keys
//! it by content block. Both are presented here as indexed fragments so the
//! aggregator never needs to know which vendor produced a chunk.

mod anthropic;
mod openai;

use meridian_registry::Provider;
use serde_json::Value;

use crate::types::UsageReport;

pub use anthropic::AnthropicChunk;
pub use openai::OpenAiChunk;

/// A tool call announced in a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolNameFragment<'a> {
    pub index: u32,
    pub name: &'a str,
    /// Provider call id, sent alongside the name
    pub id: Option<&'a str>,
}

/// A piece of a tool call's JSON arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolArgumentFragment<'a> {
    pub index: u32,
    pub chunk: &'a str,
}

/// Canonical accessors over one raw stream chunk
pub trait StreamChunkAdapter {
    fn provider(&self) -> Provider;

    fn raw(&self) -> &Value;

    /// Stream-open marker
    fn is_start(&self) -> bool;

    /// Stream-close marker
    fn is_end(&self) -> bool;

    /// Carries a tool announcement or an arguments delta
    fn is_tool_fragment(&self) -> bool;

    /// Role announced by the start chunk
    fn role(&self) -> Option<&str>;

    /// Text to append to the running completion
    fn text_fragment(&self) -> Option<&str>;

    /// Tool calls announced in this chunk, usually zero or one
    fn tool_name_fragments(&self) -> Vec<ToolNameFragment<'_>>;

    /// Argument text carried by this chunk, indexed like the names
    fn tool_argument_fragments(&self) -> Vec<ToolArgumentFragment<'_>>;

    fn finish_reason(&self) -> Option<&str>;

    /// Usage counters reported by this chunk
    fn usage(&self) -> Option<UsageReport> {
        None
    }

    fn model(&self) -> Option<&str> {
        None
    }

    /// Message of a provider error event
    fn error_message(&self) -> Option<&str> {
        None
    }
}

/// Wrap a raw chunk in the adapter for `provider`
pub fn chunk_adapter<'a>(provider: Provider, raw: &'a Value) -> Box<dyn StreamChunkAdapter + 'a> {
    match provider {
        Provider::OpenAi => Box::new(OpenAiChunk::new(raw)),
        Provider::Anthropic => Box::new(AnthropicChunk::new(raw)),
    }
}

/// Usage report, or `None` when the chunk reported no counter
fn report(prompt_tokens: Option<u64>, completion_tokens: Option<u64>, total_tokens: Option<u64>) -> Option<UsageReport> {
    let report = UsageReport {
        prompt_tokens,
        completion_tokens,
        total_tokens,
    };
    (!report.is_empty()).then_some(report)
}
