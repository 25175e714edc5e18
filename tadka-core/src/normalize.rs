//! Query normalization.
//!
//! Turns free-text user input into the canonical form used for strict
//! matching: lowercase ASCII words separated by single spaces.

use std::sync::LazyLock;

use regex::Regex;

/// Everything that is not an ASCII word character or whitespace, after lowercasing.
static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s]").expect("Invalid non-word regex"));

/// Normalize text for strict matching.
///
/// Lowercases, drops every character outside `[a-z0-9_]` and whitespace,
/// and collapses whitespace runs to a single space. The result never has
/// leading or trailing whitespace, so normalizing twice is a no-op.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = NON_WORD_REGEX.replace_all(&lowered, "");

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pattern matching `phrase` as a whole word or phrase.
///
/// "biryani" is found in "prawn biryani" but not in "biryanilicious".
/// Meant for normalized text, where `\b` only sees ASCII word characters.
pub(crate) fn phrase_pattern(phrase: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase)))
}
