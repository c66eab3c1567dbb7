//! Key/value block extractors for semi-structured formats (YAML, JSON).
//!
//! These deliberately avoid full parsers: corpus files are often templated
//! and would not parse cleanly. A `name`/`key` field equal to a term anchors
//! the search; a `description` field within a bounded forward window supplies
//! the text.

use super::normalize::normalize_text;
use super::{ExtractorKind, FileView, MatchContext, RawCandidate};
use regex::Regex;
use std::sync::LazyLock;

/// Forward window from a YAML `name:` line to its `description:`.
const YAML_WINDOW: usize = 30;
/// Forward window from a JSON `"name"` field to its `"description"`.
const JSON_WINDOW: usize = 60;

static YAML_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:-\s+)?(?:name|key)\s*:\s*['"]?(?P<term>[A-Za-z0-9_-]+)['"]?\s*$"#).unwrap()
});
static YAML_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<indent>\s*)(?:description|desc)\s*:\s*(?P<val>.*?)\s*$").unwrap());

static JSON_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:name|key)"\s*:\s*"(?P<term>[A-Za-z0-9_-]+)""#).unwrap()
});
static JSON_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""description"\s*:\s*"(?P<desc>.*?)""#).unwrap());

/// Extract `description` values near a matching `name`/`key` field in YAML,
/// supporting plain scalars and indented block scalars (`|`, `>`, `|-`, `>-`).
pub fn yaml_key_value(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    let lines = &view.lines;
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = YAML_KEY_RE.captures(line) else {
            continue;
        };
        if !ctx.terms.iter().any(|t| t == &caps["term"]) {
            continue;
        }

        for j in (i + 1)..lines.len().min(i + 1 + YAML_WINDOW) {
            let Some(dcaps) = YAML_DESC_RE.captures(&lines[j]) else {
                continue;
            };
            let val = dcaps["val"].trim_end();
            if matches!(val, "|" | ">" | "|-" | ">-") {
                // Block scalar: the content is everything indented deeper
                // than the `description:` key itself.
                let key_indent = dcaps["indent"].len();
                let mut block: Vec<String> = Vec::new();
                for line in &lines[j + 1..] {
                    if line.trim().is_empty() {
                        block.push(String::new());
                        continue;
                    }
                    let indent = line.len() - line.trim_start().len();
                    if indent <= key_indent {
                        break;
                    }
                    block.push(line.trim().to_string());
                }
                let desc = normalize_text(&block.join("\n"));
                if !desc.is_empty() {
                    out.push(RawCandidate {
                        text: desc,
                        line: j + 1,
                        kind: ExtractorKind::YamlBlock,
                    });
                }
                break;
            }
            let desc = normalize_text(val.trim().trim_matches(|c| c == '\'' || c == '"'));
            if !desc.is_empty() {
                out.push(RawCandidate {
                    text: desc,
                    line: j + 1,
                    kind: ExtractorKind::YamlScalar,
                });
            }
            break;
        }
    }
    out
}

/// Extract `"description"` values near a matching `"name"`/`"key"` field in
/// JSON, line-oriented rather than parsed.
pub fn json_key_value(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    let lines = &view.lines;
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = JSON_KEY_RE.captures(line) else {
            continue;
        };
        if !ctx.terms.iter().any(|t| t == &caps["term"]) {
            continue;
        }

        for j in i..lines.len().min(i + JSON_WINDOW) {
            let Some(dcaps) = JSON_DESC_RE.captures(&lines[j]) else {
                continue;
            };
            let desc = normalize_text(&dcaps["desc"]);
            if !desc.is_empty() {
                out.push(RawCandidate {
                    text: desc,
                    line: j + 1,
                    kind: ExtractorKind::JsonValue,
                });
            }
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DocFormat;
    use crate::matcher::TermMatcher;

    fn fixture(terms: &[&str]) -> (Vec<String>, TermMatcher) {
        let terms: Vec<String> = terms.iter().map(ToString::to_string).collect();
        let matcher = TermMatcher::new(&terms).unwrap();
        (terms, matcher)
    }

    #[test]
    fn yaml_scalar_description_is_captured() {
        let src = "- name: DD_PROFILING_ENABLED\n  default: false\n  description: 'Turns on the continuous profiler for this service.'\n";
        let (terms, matcher) = fixture(&["DD_PROFILING_ENABLED"]);
        let ctx = MatchContext {
            key: "DD_PROFILING_ENABLED",
            terms: &terms,
            matcher: &matcher,
            match_line: 0,
        };
        let found = yaml_key_value(&FileView::new(DocFormat::Yaml, src), &ctx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ExtractorKind::YamlScalar);
        assert_eq!(
            found[0].text,
            "Turns on the continuous profiler for this service."
        );
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn yaml_block_scalar_is_captured() {
        let src = "- name: DD_PROFILING_ENABLED\n  description: |\n    Turns on the continuous profiler\n    for this service.\n  default: false\n";
        let (terms, matcher) = fixture(&["DD_PROFILING_ENABLED"]);
        let ctx = MatchContext {
            key: "DD_PROFILING_ENABLED",
            terms: &terms,
            matcher: &matcher,
            match_line: 0,
        };
        let found = yaml_key_value(&FileView::new(DocFormat::Yaml, src), &ctx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ExtractorKind::YamlBlock);
        assert_eq!(
            found[0].text,
            "Turns on the continuous profiler\nfor this service."
        );
    }

    #[test]
    fn yaml_non_matching_name_is_skipped() {
        let src = "- name: DD_OTHER_SETTING\n  description: Not the one we want.\n";
        let (terms, matcher) = fixture(&["DD_PROFILING_ENABLED"]);
        let ctx = MatchContext {
            key: "DD_PROFILING_ENABLED",
            terms: &terms,
            matcher: &matcher,
            match_line: 0,
        };
        assert!(yaml_key_value(&FileView::new(DocFormat::Yaml, src), &ctx).is_empty());
    }

    #[test]
    fn json_description_near_name_is_captured() {
        let src = "{\n  \"name\": \"DD_RUNTIME_METRICS_ENABLED\",\n  \"description\": \"Sends runtime metrics alongside traces for this service.\"\n}\n";
        let (terms, matcher) = fixture(&["DD_RUNTIME_METRICS_ENABLED"]);
        let ctx = MatchContext {
            key: "DD_RUNTIME_METRICS_ENABLED",
            terms: &terms,
            matcher: &matcher,
            match_line: 0,
        };
        let found = json_key_value(&FileView::new(DocFormat::Json, src), &ctx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ExtractorKind::JsonValue);
        assert_eq!(found[0].line, 3);
    }
}
