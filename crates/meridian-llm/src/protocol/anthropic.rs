use jiff::Timestamp;
use serde::Deserialize;

use super::{lenient, lenient_timestamp};

/// Anthropic model entry
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicModel {
    /// Model identifier
    pub id: String,
    /// Object type (always "model")
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    /// Human-readable name
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    /// Release time, sent as RFC 3339 text
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}
