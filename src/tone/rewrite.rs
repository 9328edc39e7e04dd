//! Positivity rewrite
//!
//! Softens imperative and harsh phrasings before a message leaves the
//! composer. Runs on every delivery action and must be idempotent.

use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"(?i)\b(você precisa|você tem que)\b", "talvez possa te ajudar a"),
            (r"(?i)\bpare de\b", "talvez diminuir"),
            (r"(?i)\b(ruim|péssimo|horrível)\b", "pode melhorar"),
            (r"!{2,}", "!"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
            Ok(pattern) => Some(Rule {
                pattern,
                replacement,
            }),
            Err(e) => {
                tracing::error!("Invalid rewrite pattern '{}': {}", pattern, e);
                None
            }
        })
        .collect()
    })
}

/// Rewrite `text` into a softer form.
///
/// Replacements never reintroduce a matched phrasing, so
/// `rewrite(&rewrite(t)) == rewrite(t)`.
pub fn rewrite(text: &str) -> String {
    rules().iter().fold(text.to_string(), |acc, rule| {
        rule.pattern.replace_all(&acc, rule.replacement).into_owned()
    })
}
