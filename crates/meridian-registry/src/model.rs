use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::Provider;

/// Capability and pricing metadata for one model
///
/// Built by [`crate::ModelCapabilityResolver`]; listing adapters layer the
/// provider-reported creation time, display name and extras on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ModelInfo {
    /// Model identifier as the provider reports it
    pub id: String,
    /// When the provider published the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Human-readable name
    pub display_name: String,
    /// Vendor serving the model
    pub provider: Provider,
    /// Provider-specific extras (e.g. `owned_by`)
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Context window in tokens
    pub context_window: Option<u32>,
    /// Maximum output tokens per response
    pub max_output_tokens: Option<u32>,
    /// Accepts image input
    pub supports_vision: bool,
    /// Supports tool/function calling
    pub supports_functions: bool,
    /// Supports a constrained JSON response mode
    pub supports_json_mode: bool,
    /// Price per 1000 prompt tokens (USD)
    pub input_price_per_1k: Option<f64>,
    /// Price per 1000 completion tokens (USD)
    pub output_price_per_1k: Option<f64>,
}

impl ModelInfo {
    /// Attach the provider-reported creation time
    #[must_use]
    pub fn with_created_at(mut self, created_at: Option<Timestamp>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Replace the derived display name
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Attach provider-specific extras
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Estimate the cost of a request with the given token counts
    ///
    /// `None` when either price is unknown.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate_cost(&self, prompt_tokens: u64, completion_tokens: u64) -> Option<f64> {
        let input = self.input_price_per_1k?;
        let output = self.output_price_per_1k?;
        Some((prompt_tokens as f64 / 1000.0) * input + (completion_tokens as f64 / 1000.0) * output)
    }
}
