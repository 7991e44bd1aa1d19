use jiff::Timestamp;
use serde::Deserialize;

use super::{lenient, lenient_timestamp};

/// `OpenAI` model entry
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiModel {
    /// Model identifier
    pub id: String,
    /// Object type (usually "model")
    #[serde(default, deserialize_with = "lenient")]
    pub object: Option<String>,
    /// Creation time, sent as epoch seconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<Timestamp>,
    /// Owning organisation
    #[serde(default, deserialize_with = "lenient")]
    pub owned_by: Option<String>,
}
