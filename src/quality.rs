//! The quality bar: deterministic accept/reject for candidate descriptions.
//!
//! Conservative by construction. A rejected candidate costs at most one
//! description; an accepted bad candidate pollutes the catalog. The filter is
//! a pure function of the normalized text, so identical text always gets the
//! identical verdict regardless of where it was found.

use crate::extract::normalize::normalize_text;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum normalized length for a usable description.
const MIN_LENGTH: usize = 20;
/// Word-count ceiling for the single-sentence toggle rejection.
const MAX_TOGGLE_WORDS: usize = 10;

/// Known placeholder values that document nothing.
const PLACEHOLDERS: &[&str] = &["tbd", "todo", "n/a", "na", "none"];

/// Openers of referral text that points at other documentation instead of
/// describing the setting.
const REFERRAL_OPENERS: &[&str] = &[
    "see the",
    "see our",
    "see http",
    "refer to",
    "for more information",
    "for details",
    "read the",
    "check the",
];

/// Verbs opening a bare on/off toggle sentence.
const TOGGLE_VERBS: &[&str] = &["enable", "enables", "disable", "disables", "turn", "turns"];

/// A raw assignment statement rather than prose (`export DD_FOO=...`).
static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:export\s+)?(?:DD|OTEL)_[A-Z0-9_]+\s*=").unwrap());

/// Short-but-precise phrases admitted below the length floor.
static SHORT_EXCEPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:api key|app key)\b").unwrap());

/// Whether a candidate description clears the quality bar.
pub fn passes_quality_bar(description: &str) -> bool {
    let text = normalize_text(description);
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();

    if PLACEHOLDERS.contains(&lowered.as_str()) {
        return false;
    }
    // Dominated by unresolved templating markers.
    if text.matches("{{").count() >= 2 || text.matches("}}").count() >= 2 {
        return false;
    }
    if ASSIGNMENT_RE.is_match(&text) {
        return false;
    }
    if REFERRAL_OPENERS.iter().any(|o| lowered.starts_with(o)) {
        return false;
    }
    if is_bare_toggle(&text, &lowered) {
        return false;
    }
    if text.chars().count() < MIN_LENGTH {
        return SHORT_EXCEPTION_RE.is_match(&lowered);
    }
    true
}

/// A short single sentence that only says the setting turns something on or
/// off: starts with a toggle verb, has no internal punctuation, and stays at
/// or below the word ceiling. Such text lacks the specificity we require.
fn is_bare_toggle(text: &str, lowered: &str) -> bool {
    let Some(first_word) = lowered.split_whitespace().next() else {
        return false;
    };
    if !TOGGLE_VERBS.contains(&first_word) {
        return false;
    }
    if text.contains(',') || text.contains(';') || text.contains('(') || text.contains(':') {
        return false;
    }
    text.split_whitespace().count() <= MAX_TOGGLE_WORDS
}
