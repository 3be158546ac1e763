//! Word bank extraction from lesson markdown.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static STRONG_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong emphasis pattern is valid"));

/// Collect `**term**` spans in order of first appearance.
///
/// Terms are compared exactly as written (case-sensitive); blank spans are
/// dropped. The whole source is rescanned on every call.
pub fn extract_word_bank(markdown: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut bank = Vec::new();

    for captures in STRONG_EMPHASIS.captures_iter(markdown) {
        let Some(term) = captures.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if term.trim().is_empty() {
            continue;
        }
        if seen.insert(term) {
            bank.push(term.to_string());
        }
    }

    bank
}
