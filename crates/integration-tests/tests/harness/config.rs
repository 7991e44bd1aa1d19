//! Programmatic configuration builder for integration tests

use meridian_config::{Config, ModelOverride};
use meridian_registry::ModelCapabilityResolver;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with every section defaulted
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Append a model override rule
    pub fn with_override(mut self, rule: ModelOverride) -> Self {
        self.config.models.overrides.push(rule);
        self
    }

    /// Price every model matching `pattern`
    pub fn with_prices(self, pattern: &str, input: f64, output: f64) -> Self {
        self.with_override(ModelOverride {
            pattern: pattern.to_owned(),
            input_price_per_1k: Some(input),
            output_price_per_1k: Some(output),
            ..ModelOverride::default()
        })
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }

    /// Build a resolver from the final config
    pub fn resolver(self) -> ModelCapabilityResolver {
        ModelCapabilityResolver::from_config(&self.config.models).expect("valid override rules")
    }
}
