//! Built-in pattern tables
//!
//! Each attribute has its own ordered table; patterns are unanchored regexes
//! tested top to bottom against the model id. Order matters: dated or
//! otherwise narrower families must come before the family they belong to.

use std::sync::OnceLock;

use regex::Regex;

use crate::provider::Provider;

/// Ordered `(pattern, value)` rules with a fallback value
#[derive(Debug)]
pub(crate) struct RuleTable<T> {
    rules: Vec<(Regex, T)>,
    default: T,
}

impl<T: Copy> RuleTable<T> {
    fn new(rules: &[(&str, T)], default: T) -> Self {
        let rules = rules
            .iter()
            .map(|(pattern, value)| (Regex::new(pattern).expect("built-in model pattern must be valid regex"), *value))
            .collect();

        Self { rules, default }
    }

    /// Value of the first rule matching `model_id`, or the table default
    pub(crate) fn lookup(&self, model_id: &str) -> T {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(model_id))
            .map_or(self.default, |(_, value)| *value)
    }
}

/// One table per resolved attribute
#[derive(Debug)]
pub(crate) struct ProviderRules {
    pub context_window: RuleTable<u32>,
    pub max_output_tokens: RuleTable<u32>,
    pub input_price_per_1k: RuleTable<f64>,
    pub output_price_per_1k: RuleTable<f64>,
    pub supports_vision: RuleTable<bool>,
    pub supports_functions: RuleTable<bool>,
    pub supports_json_mode: RuleTable<bool>,
}

/// Built-in tables for a provider
pub(crate) fn builtin(provider: Provider) -> &'static ProviderRules {
    static OPENAI: OnceLock<ProviderRules> = OnceLock::new();
    static ANTHROPIC: OnceLock<ProviderRules> = OnceLock::new();

    match provider {
        Provider::OpenAi => OPENAI.get_or_init(openai),
        Provider::Anthropic => ANTHROPIC.get_or_init(anthropic),
    }
}

fn openai() -> ProviderRules {
    ProviderRules {
        context_window: RuleTable::new(
            &[
                ("gpt-4o|o1|gpt-4-turbo", 128_000),
                ("gpt-4-0[0-9]{3}", 8_192),
                (r"gpt-3\.5-turbo-instruct", 4_096),
                (r"gpt-3\.5", 16_385),
            ],
            4_096,
        ),
        max_output_tokens: RuleTable::new(
            &[
                ("o1-2024-12-17", 100_000),
                ("o1-mini-2024-09-12", 65_536),
                ("o1-preview-2024-09-12", 32_768),
                ("gpt-4o|gpt-4-turbo", 16_384),
                ("gpt-4-0[0-9]{3}", 8_192),
                (r"gpt-3\.5-turbo", 4_096),
            ],
            4_096,
        ),
        input_price_per_1k: RuleTable::new(
            &[
                ("o1-2024", 0.015),
                ("o1-mini", 0.003),
                ("gpt-4o-realtime-preview", 0.005),
                ("gpt-4o-mini-realtime-preview", 0.0006),
                ("gpt-4o-mini", 0.000_15),
                ("gpt-4o", 0.0025),
                ("gpt-4-turbo", 0.01),
                (r"gpt-3\.5", 0.0005),
            ],
            0.0005,
        ),
        output_price_per_1k: RuleTable::new(
            &[
                ("o1-2024", 0.06),
                ("o1-mini", 0.012),
                ("gpt-4o-realtime-preview", 0.02),
                ("gpt-4o-mini-realtime-preview", 0.0024),
                ("gpt-4o-mini", 0.0006),
                ("gpt-4o", 0.01),
                ("gpt-4-turbo", 0.03),
                (r"gpt-3\.5", 0.0015),
            ],
            0.0015,
        ),
        // The two 2023 snapshots predate image input
        supports_vision: RuleTable::new(
            &[
                ("vision", true),
                ("gpt-4-(0314|0613)", false),
                ("gpt-4-", true),
                ("gpt-4o", true),
            ],
            false,
        ),
        supports_functions: RuleTable::new(&[("instruct", false)], true),
        supports_json_mode: RuleTable::new(
            &[(r"gpt-4-\d{4}-preview", true), ("turbo", true), ("gpt-4o", true)],
            false,
        ),
    }
}

fn anthropic() -> ProviderRules {
    ProviderRules {
        context_window: RuleTable::new(
            &[
                ("claude-(opus|sonnet|haiku)-4", 200_000),
                ("claude-3-5-(sonnet|haiku)", 200_000),
                ("claude-3-(opus|sonnet|haiku)", 200_000),
            ],
            100_000,
        ),
        max_output_tokens: RuleTable::new(
            &[
                ("claude-sonnet-4", 64_000),
                ("claude-opus-4", 32_000),
                ("claude-3-5-(sonnet|haiku)", 8_192),
                ("claude-3-(opus|sonnet|haiku)", 4_096),
            ],
            4_096,
        ),
        input_price_per_1k: RuleTable::new(
            &[
                ("claude-opus-4", 0.015),
                ("claude-sonnet-4", 0.003),
                ("claude-3-5-sonnet", 0.003),
                ("claude-3-5-haiku", 0.0008),
                ("claude-3-opus", 0.015),
                ("claude-3-sonnet", 0.003),
                ("claude-3-haiku", 0.000_25),
            ],
            0.003,
        ),
        output_price_per_1k: RuleTable::new(
            &[
                ("claude-opus-4", 0.075),
                ("claude-sonnet-4", 0.015),
                ("claude-3-5-sonnet", 0.015),
                ("claude-3-5-haiku", 0.004),
                ("claude-3-opus", 0.075),
                ("claude-3-sonnet", 0.015),
                ("claude-3-haiku", 0.001_25),
            ],
            0.015,
        ),
        supports_vision: RuleTable::new(&[("claude-3-5-haiku", false)], true),
        supports_functions: RuleTable::new(&[("claude-3", true), ("claude-(opus|sonnet|haiku)-4", true)], false),
        supports_json_mode: RuleTable::new(&[("claude-3", true), ("claude-(opus|sonnet|haiku)-4", true)], false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let table = RuleTable::new(&[("gpt-4o-mini", 1), ("gpt-4o", 2)], 0);
        assert_eq!(table.lookup("gpt-4o-mini-2024-07-18"), 1);
        assert_eq!(table.lookup("gpt-4o-2024-08-06"), 2);
        assert_eq!(table.lookup("davinci-002"), 0);
    }

    #[test]
    fn general_rule_first_shadows_specific() {
        let table = RuleTable::new(&[("gpt-4o", 2), ("gpt-4o-mini", 1)], 0);
        assert_eq!(table.lookup("gpt-4o-mini"), 2);
    }

    #[test]
    fn legacy_snapshots_lack_vision() {
        let rules = builtin(Provider::OpenAi);
        assert!(!rules.supports_vision.lookup("gpt-4-0613"));
        assert!(!rules.supports_vision.lookup("gpt-4-0314"));
        assert!(rules.supports_vision.lookup("gpt-4-turbo-2024-04-09"));
        assert!(rules.supports_vision.lookup("gpt-4-vision-preview"));
        assert!(!rules.supports_vision.lookup("gpt-3.5-turbo"));
    }
}
