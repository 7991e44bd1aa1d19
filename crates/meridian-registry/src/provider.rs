use serde::{Deserialize, Serialize};

/// LLM vendor whose payload shape and model families are understood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Provider {
    /// `OpenAI` chat completions API
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Anthropic Messages API
    #[serde(rename = "anthropic")]
    #[strum(serialize = "anthropic")]
    Anthropic,
}

impl Provider {
    /// Vendor name as presented to people
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}
