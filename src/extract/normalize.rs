//! Text normalization for extracted snippets.
//!
//! Normalization strips presentation syntax (markdown links, inline code,
//! simple HTML, Hugo shortcodes) while keeping the visible text verbatim. The
//! engine never rewrites wording; these passes only remove markup.

use regex::Regex;
use std::sync::LazyLock;

static REF_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\[[^\]]+\]").unwrap());
static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static CODE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?code\s*>").unwrap());
static ANCHOR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?a\b[^>]*>").unwrap());
static BR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-z][^>]*>").unwrap());
static SHORTCODE_ANGLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{<[^>]*>\}\}").unwrap());
static SHORTCODE_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{%[^%]*%\}\}").unwrap());
static HORIZONTAL_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static ANY_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Environment-variable-shaped tokens used to spot catalog-dump text. The
/// pattern is a heuristic over naming conventions, not an exact catalog check.
static CONFIG_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:DD|OTEL)_[A-Z0-9_]+\b").unwrap());

/// Normalize a captured snippet: unify line endings, trim per-line trailing
/// whitespace, strip markup while keeping visible text, collapse runs of
/// horizontal whitespace, and trim.
pub fn normalize_text(s: &str) -> String {
    let s = s.trim().replace("\r\n", "\n").replace('\r', "\n");
    let s = s
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let s = s.trim();

    let s = REF_LINK_RE.replace_all(s, "$1");
    let s = INLINE_LINK_RE.replace_all(&s, "$1");
    let s = s.replace('`', "");
    let s = CODE_TAG_RE.replace_all(&s, "");
    let s = ANCHOR_TAG_RE.replace_all(&s, "");
    let s = BR_TAG_RE.replace_all(&s, "\n");
    let s = HTML_TAG_RE.replace_all(&s, "");
    let s = SHORTCODE_ANGLE_RE.replace_all(&s, "");
    let s = SHORTCODE_PERCENT_RE.replace_all(&s, "");
    let s = HORIZONTAL_WS_RE.replace_all(&s, " ");
    s.trim().to_string()
}

/// Case-folded, whitespace-collapsed form used for result deduplication.
pub fn normalize_for_dedupe(s: &str) -> String {
    let s = normalize_text(s).to_lowercase();
    ANY_WS_RE.replace_all(&s, " ").trim().to_string()
}

/// Count distinct configuration-key-like tokens in `text` other than `key`.
///
/// Used both to reject catalog-like paragraph dumps and as a ranking feature
/// (fewer mentions of other keys means the text is about this key).
pub fn count_other_config_tokens(text: &str, key: &str) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for m in CONFIG_TOKEN_RE.find_iter(text) {
        let token = m.as_str();
        if token != key && !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.len()
}
