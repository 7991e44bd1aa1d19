use serde::Deserialize;

/// Model capability overrides, evaluated before the built-in rule tables
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Ordered override rules; the first matching rule that sets an attribute wins
    #[serde(default)]
    pub overrides: Vec<ModelOverride>,
}

/// A single override rule
///
/// Attributes left unset fall through to the next matching rule, and
/// finally to the built-in tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelOverride {
    /// Restrict the rule to one provider (e.g. "openai", "anthropic")
    #[serde(default)]
    pub provider: Option<String>,
    /// Regex matched against the model identifier
    pub pattern: String,
    /// Context window in tokens
    #[serde(default)]
    pub context_window: Option<u32>,
    /// Maximum output tokens
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    /// Price per 1000 prompt tokens
    #[serde(default)]
    pub input_price_per_1k: Option<f64>,
    /// Price per 1000 completion tokens
    #[serde(default)]
    pub output_price_per_1k: Option<f64>,
    /// Image input support
    #[serde(default)]
    pub supports_vision: Option<bool>,
    /// Tool/function calling support
    #[serde(default)]
    pub supports_functions: Option<bool>,
    /// JSON response mode support
    #[serde(default)]
    pub supports_json_mode: Option<bool>,
}
