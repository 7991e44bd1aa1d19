//! Human-readable names derived from model identifiers

use std::sync::OnceLock;

use regex::Regex;

use crate::provider::Provider;

/// Derive a display name for a model id
///
/// `OpenAI` ids are title-cased with brand casing restored
/// (`gpt-4o-mini` becomes `GPT-4o-Mini`). Anthropic reports display names
/// in its listings, so its ids are returned unchanged.
pub fn format_display_name(provider: Provider, model_id: &str) -> String {
    match provider {
        Provider::OpenAi => openai_display_name(model_id),
        Provider::Anthropic => model_id.to_owned(),
    }
}

/// Brand-casing rewrites, applied in order to the title-cased id
fn rewrites() -> &'static [(Regex, &'static str)] {
    static REWRITES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    REWRITES.get_or_init(|| {
        [
            // Collapse dates to YYYYMMDD
            (r"(\d{4}) (\d{2}) (\d{2})", "${1}${2}${3}"),
            (r"^Gpt ", "GPT-"),
            (r"^O1 ", "O1-"),
            (r"^Chatgpt ", "ChatGPT-"),
            (r"^Tts ", "TTS-"),
            (r"^Dall E ", "DALL-E-"),
            (r"3\.5 ", "3.5-"),
            (r"4 ", "4-"),
            (r"4o (Mini|Preview|Turbo)", "4o-${1}"),
            (r"\bHd\b", "HD"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("must be valid regex"), replacement))
        .collect()
    })
}

fn openai_display_name(model_id: &str) -> String {
    let mut name = title_case(&model_id.replace('-', " "));
    for (pattern, replacement) in rewrites() {
        name = pattern.replace_all(&name, *replacement).into_owned();
    }
    name
}

/// Lowercase everything, then capitalise the first letter of each word
fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() => first.to_uppercase().chain(chars).collect(),
                _ => lower,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
