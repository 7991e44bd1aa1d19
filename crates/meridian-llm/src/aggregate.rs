//! Left fold of a chunk sequence into one [`CanonicalMessage`]
//!
//! Chunks are folded strictly in arrival order, each exactly once. There is
//! no deduplication: folding the same chunk twice appends its fragments
//! twice. Tool arguments stay uninterpreted text until [`StreamAggregator::finalize`].

use std::collections::BTreeMap;
use std::fmt::Display;
use std::pin::pin;

use futures_util::{Stream, StreamExt};
use meridian_registry::Provider;
use serde_json::Value;

use crate::chunk::{StreamChunkAdapter, chunk_adapter};
use crate::error::StreamError;
use crate::types::{CanonicalMessage, DEFAULT_ROLE, ToolCallInvocation, UsageReport};

/// A tool call being assembled from fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolBuffer {
    pub id: Option<String>,
    pub name: String,
    pub arguments_raw: String,
}

/// Everything folded so far for one response
///
/// Inspectable at any point, e.g. to show a partial answer when the caller
/// stops consuming early. It only becomes a [`CanonicalMessage`] once the
/// end chunk has been folded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationState {
    role: Option<String>,
    model: Option<String>,
    content: String,
    tool_buffers: BTreeMap<u32, ToolBuffer>,
    finish_reason: Option<String>,
    usage: UsageReport,
    started: bool,
    ended: bool,
    chunks: usize,
}

impl AggregationState {
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Text accumulated so far
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Pending tool calls keyed by their stream index
    pub const fn tool_buffers(&self) -> &BTreeMap<u32, ToolBuffer> {
        &self.tool_buffers
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    pub const fn usage(&self) -> UsageReport {
        self.usage
    }

    pub const fn is_started(&self) -> bool {
        self.started
    }

    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    /// Number of chunks folded successfully
    pub const fn chunks_folded(&self) -> usize {
        self.chunks
    }

    fn tool_buffer(&mut self, index: u32, position: usize) -> &mut ToolBuffer {
        self.tool_buffers.entry(index).or_insert_with(|| {
            tracing::debug!(position, index, "tool buffer opened");
            ToolBuffer::default()
        })
    }

    fn into_message(self) -> CanonicalMessage {
        // Dense renumbering in key order; Anthropic keys are content block
        // positions shared with text blocks
        let tool_calls: Vec<ToolCallInvocation> = self
            .tool_buffers
            .into_values()
            .zip(0u32..)
            .map(|(buffer, index)| {
                let call = ToolCallInvocation::from_raw(index, buffer.id, buffer.name, buffer.arguments_raw);
                if let Err(e) = &call.arguments {
                    tracing::warn!(index, name = %call.name, error = %e, "tool call arguments did not parse");
                }
                call
            })
            .collect();

        tracing::debug!(
            chunks = self.chunks,
            content_len = self.content.len(),
            tool_calls = tool_calls.len(),
            finish_reason = ?self.finish_reason,
            "stream finalized"
        );

        CanonicalMessage {
            role: self.role.unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
            content: self.content,
            tool_calls,
            finish_reason: self.finish_reason,
            usage: self.usage.into_usage(),
        }
    }
}

/// Folds the chunks of one streamed response
///
/// One aggregator per response; it holds no shared state, so concurrent
/// responses each get their own.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    state: AggregationState,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// State folded so far
    pub const fn state(&self) -> &AggregationState {
        &self.state
    }

    /// Fold the next chunk
    ///
    /// A chunk that violates the stream protocol is rejected before any
    /// of it is applied, leaving the state as it was.
    pub fn fold<C: StreamChunkAdapter + ?Sized>(&mut self, chunk: &C) -> Result<(), StreamError> {
        let state = &mut self.state;
        let position = state.chunks;

        if let Some(message) = chunk.error_message() {
            tracing::debug!(position, error = message, "provider error event");
            return Err(StreamError::Provider {
                position,
                message: message.to_owned(),
            });
        }

        let starts = chunk.is_start();
        if starts && state.started {
            return Err(StreamError::DuplicateStart { position });
        }
        if !starts && !state.started {
            return Err(StreamError::MissingStart { position });
        }

        let text = chunk.text_fragment().filter(|text| !text.is_empty());
        let names = chunk.tool_name_fragments();
        let arguments = chunk.tool_argument_fragments();

        // Usage-only chunks may trail the end marker
        if state.ended && (text.is_some() || !names.is_empty() || !arguments.is_empty()) {
            return Err(StreamError::ChunkAfterEnd { position });
        }

        if starts {
            state.started = true;
            state.role = Some(chunk.role().unwrap_or(DEFAULT_ROLE).to_owned());
            tracing::debug!(provider = %chunk.provider(), position, role = state.role.as_deref(), "stream started");
        }
        if state.model.is_none() {
            state.model = chunk.model().map(str::to_owned);
        }

        if let Some(text) = text {
            state.content.push_str(text);
        }

        for fragment in names {
            let buffer = state.tool_buffer(fragment.index, position);
            buffer.name.push_str(fragment.name);
            if buffer.id.is_none() {
                buffer.id = fragment.id.map(str::to_owned);
            }
        }

        for fragment in arguments {
            state
                .tool_buffer(fragment.index, position)
                .arguments_raw
                .push_str(fragment.chunk);
        }

        if let Some(reason) = chunk.finish_reason() {
            state.finish_reason = Some(reason.to_owned());
        }

        if let Some(usage) = chunk.usage() {
            state.usage.merge(usage);
        }

        if chunk.is_end() && !state.ended {
            state.ended = true;
            tracing::debug!(position, finish_reason = state.finish_reason.as_deref(), "stream ended");
        }

        state.chunks += 1;
        tracing::trace!(position, "chunk folded");

        Ok(())
    }

    /// Emit the message and reset for reuse
    ///
    /// Fails without touching the state when the end chunk has not been
    /// folded yet.
    pub fn finalize(&mut self) -> Result<CanonicalMessage, StreamError> {
        if !self.state.ended {
            return Err(StreamError::NotEnded {
                chunks: self.state.chunks,
            });
        }

        Ok(std::mem::take(&mut self.state).into_message())
    }
}

/// Fold a complete sequence of raw chunks
pub fn aggregate<'a, I>(provider: Provider, chunks: I) -> Result<CanonicalMessage, StreamError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut aggregator = StreamAggregator::new();
    for raw in chunks {
        aggregator.fold(&*chunk_adapter(provider, raw))?;
    }
    aggregator.finalize()
}

/// Fold raw chunks as the transport delivers them
///
/// Stops at the first transport or protocol error.
pub async fn aggregate_stream<S, E>(provider: Provider, chunks: S) -> Result<CanonicalMessage, StreamError>
where
    S: Stream<Item = Result<Value, E>>,
    E: Display,
{
    let mut chunks = pin!(chunks);
    let mut aggregator = StreamAggregator::new();

    while let Some(item) = chunks.next().await {
        let raw = item.map_err(|e| StreamError::Transport {
            position: aggregator.state().chunks_folded(),
            message: e.to_string(),
        })?;
        aggregator.fold(&*chunk_adapter(provider, &raw))?;
    }

    aggregator.finalize()
}
