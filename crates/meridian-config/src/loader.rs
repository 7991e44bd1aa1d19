use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;

        tracing::debug!(
            path = %path.display(),
            overrides = config.models.overrides.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if an override pattern is not a valid regex or a
    /// price is negative or not finite
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_model_overrides()
    }

    fn validate_model_overrides(&self) -> anyhow::Result<()> {
        for (position, rule) in self.models.overrides.iter().enumerate() {
            regex::Regex::new(&rule.pattern)
                .map_err(|e| anyhow::anyhow!("invalid pattern in models.overrides[{position}]: {e}"))?;

            let prices = [
                ("input_price_per_1k", rule.input_price_per_1k),
                ("output_price_per_1k", rule.output_price_per_1k),
            ];
            for (field, price) in prices {
                if let Some(price) = price
                    && (!price.is_finite() || price < 0.0)
                {
                    anyhow::bail!("models.overrides[{position}].{field} must be a non-negative number");
                }
            }
        }

        Ok(())
    }
}
