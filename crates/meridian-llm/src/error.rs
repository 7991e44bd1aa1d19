use thiserror::Error;

/// Protocol faults raised while folding a chunk sequence
///
/// `position` is the zero-based arrival index of the offending chunk, so the
/// caller can point at the exact event in a captured stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A second stream-open marker arrived
    #[error("duplicate start chunk at position {position}")]
    DuplicateStart { position: usize },

    /// A chunk arrived before the stream-open marker
    #[error("chunk at position {position} arrived before the start chunk")]
    MissingStart { position: usize },

    /// Content arrived after the stream-close marker
    #[error("chunk at position {position} carries content after the end chunk")]
    ChunkAfterEnd { position: usize },

    /// `finalize` was called before the stream-close marker was folded
    #[error("stream has not ended after {chunks} chunks")]
    NotEnded { chunks: usize },

    /// The provider sent an error event in place of content
    #[error("provider error at position {position}: {message}")]
    Provider { position: usize, message: String },

    /// The transport failed to deliver the next chunk
    #[error("transport error at position {position}: {message}")]
    Transport { position: usize, message: String },
}

impl StreamError {
    /// Whether the fault lies in the order of chunks rather than their source
    pub const fn is_sequence_violation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateStart { .. } | Self::MissingStart { .. } | Self::ChunkAfterEnd { .. } | Self::NotEnded { .. }
        )
    }
}

/// Accumulated tool arguments that are not a JSON document
///
/// Attached to the one affected [`crate::ToolCallInvocation`]; the rest of
/// the message stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tool arguments are not valid JSON: {message}")]
pub struct ToolArgumentError {
    pub message: String,
}

impl From<serde_json::Error> for ToolArgumentError {
    fn from(err: serde_json::Error) -> Self {
        Self { message: err.to_string() }
    }
}
