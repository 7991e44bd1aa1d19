//! Model identifier to [`ModelInfo`] resolution

use std::str::FromStr;
use std::sync::OnceLock;

use meridian_config::{ModelOverride, ModelsConfig};
use regex::Regex;
use serde_json::Map;

use crate::display::format_display_name;
use crate::error::RegistryError;
use crate::model::ModelInfo;
use crate::provider::Provider;
use crate::rules;

/// Resolve a model identifier against the built-in tables only
pub fn resolve(model_id: &str, provider: Provider) -> ModelInfo {
    ModelCapabilityResolver::builtin().resolve(model_id, provider)
}

/// A configured override rule with its pattern compiled
#[derive(Debug)]
struct OverrideRule {
    provider: Option<Provider>,
    pattern: Regex,
    values: ModelOverride,
}

impl OverrideRule {
    fn applies(&self, model_id: &str, provider: Provider) -> bool {
        self.provider.is_none_or(|p| p == provider) && self.pattern.is_match(model_id)
    }
}

/// Ordered-rule capability and pricing resolver
///
/// Configured overrides are consulted first, attribute by attribute; an
/// override that leaves an attribute unset falls through to later overrides
/// and then to the built-in table for that attribute.
#[derive(Debug, Default)]
pub struct ModelCapabilityResolver {
    overrides: Vec<OverrideRule>,
}

impl ModelCapabilityResolver {
    /// Shared resolver without overrides
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<ModelCapabilityResolver> = OnceLock::new();
        BUILTIN.get_or_init(Self::default)
    }

    /// Build a resolver with the configured overrides
    pub fn from_config(config: &ModelsConfig) -> Result<Self, RegistryError> {
        let overrides = config
            .overrides
            .iter()
            .map(|rule| {
                let provider = rule
                    .provider
                    .as_deref()
                    .map(|name| {
                        Provider::from_str(name).map_err(|_| RegistryError::UnknownProvider {
                            provider: name.to_owned(),
                        })
                    })
                    .transpose()?;

                let pattern = Regex::new(&rule.pattern).map_err(|source| RegistryError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                })?;

                Ok(OverrideRule {
                    provider,
                    pattern,
                    values: rule.clone(),
                })
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        tracing::debug!(overrides = overrides.len(), "model capability resolver configured");

        Ok(Self { overrides })
    }

    /// Resolve capability and pricing metadata for a model identifier
    ///
    /// Never fails: an unrecognised identifier receives the provider's
    /// default tier.
    pub fn resolve(&self, model_id: &str, provider: Provider) -> ModelInfo {
        let builtin = rules::builtin(provider);
        let matching: Vec<&ModelOverride> = self
            .overrides
            .iter()
            .filter(|rule| rule.applies(model_id, provider))
            .map(|rule| &rule.values)
            .collect();

        ModelInfo {
            id: model_id.to_owned(),
            created_at: None,
            display_name: format_display_name(provider, model_id),
            provider,
            metadata: Map::new(),
            context_window: Some(pick(&matching, |o| o.context_window, || {
                builtin.context_window.lookup(model_id)
            })),
            max_output_tokens: Some(pick(&matching, |o| o.max_output_tokens, || {
                builtin.max_output_tokens.lookup(model_id)
            })),
            supports_vision: pick(&matching, |o| o.supports_vision, || {
                builtin.supports_vision.lookup(model_id)
            }),
            supports_functions: pick(&matching, |o| o.supports_functions, || {
                builtin.supports_functions.lookup(model_id)
            }),
            supports_json_mode: pick(&matching, |o| o.supports_json_mode, || {
                builtin.supports_json_mode.lookup(model_id)
            }),
            input_price_per_1k: Some(pick(&matching, |o| o.input_price_per_1k, || {
                builtin.input_price_per_1k.lookup(model_id)
            })),
            output_price_per_1k: Some(pick(&matching, |o| o.output_price_per_1k, || {
                builtin.output_price_per_1k.lookup(model_id)
            })),
        }
    }
}

/// First override value for an attribute, else the built-in lookup
fn pick<T>(matching: &[&ModelOverride], field: impl Fn(&ModelOverride) -> Option<T>, fallback: impl FnOnce() -> T) -> T {
    matching.iter().find_map(|o| field(o)).unwrap_or_else(fallback)
}
