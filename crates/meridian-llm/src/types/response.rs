use serde::{Deserialize, Serialize};

/// Reason the model stopped generating, normalised across providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation or a stop sequence
    Stop,
    /// Hit the output token limit
    Length,
    /// Model decided to call a tool
    ToolCalls,
    /// Content was withheld by safety systems
    ContentFilter,
}

impl FinishReason {
    /// Map a provider finish string onto the shared vocabulary
    ///
    /// Both vendors' vocabularies are accepted; they do not overlap.
    pub fn from_provider(reason: &str) -> Option<Self> {
        match reason {
            "stop" | "end_turn" | "stop_sequence" => Some(Self::Stop),
            "length" | "max_tokens" => Some(Self::Length),
            "tool_calls" | "function_call" | "tool_use" => Some(Self::ToolCalls),
            "content_filter" | "refusal" => Some(Self::ContentFilter),
            _ => None,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u64,
    /// Tokens generated in the completion
    pub completion_tokens: u64,
    /// Total tokens, the sum of the two when not reported
    pub total_tokens: u64,
}

impl Usage {
    /// Build usage, computing the total when the provider omitted it
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: Option<u64>) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: total_tokens.unwrap_or_else(|| prompt_tokens.saturating_add(completion_tokens)),
        }
    }
}

/// Usage counters as reported so far by a stream
///
/// Providers report usage piecemeal (Anthropic sends input tokens on open
/// and output tokens on the closing delta), so each field is tracked
/// separately and later reports overwrite earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl UsageReport {
    /// Overlay the fields present in `newer`
    pub fn merge(&mut self, newer: Self) {
        self.prompt_tokens = newer.prompt_tokens.or(self.prompt_tokens);
        self.completion_tokens = newer.completion_tokens.or(self.completion_tokens);
        self.total_tokens = newer.total_tokens.or(self.total_tokens);
    }

    /// Whether any counter has been reported
    pub const fn is_empty(&self) -> bool {
        self.prompt_tokens.is_none() && self.completion_tokens.is_none() && self.total_tokens.is_none()
    }

    /// Final usage, or `None` when nothing was reported
    pub fn into_usage(self) -> Option<Usage> {
        if self.is_empty() {
            return None;
        }

        Some(Usage::new(
            self.prompt_tokens.unwrap_or(0),
            self.completion_tokens.unwrap_or(0),
            self.total_tokens,
        ))
    }
}
