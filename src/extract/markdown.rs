//! Markdown extractors: definition lists, tables, inline bullets.

use super::normalize::normalize_text;
use super::{ExtractorKind, FileView, MatchContext, RawCandidate, looks_like_heading};
use regex::Regex;
use std::sync::LazyLock;

/// A line that is exactly one backticked term, e.g. `` `DD_TRACE_ENABLED` ``.
static TERM_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*`(?P<term>[^`]+)`\s*$").unwrap());
static COLON_LEAD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*:\s*").unwrap());
static TABLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?\s*:?-{3,}").unwrap());

/// Definition body capture stops after this many lines.
const MAX_DEFINITION_LINES: usize = 10;
/// A long table mentioning a term in many rows must not flood the candidates.
const MAX_TABLE_MATCHES: usize = 3;
/// How far above a table row we look for its header.
const HEADER_WINDOW: usize = 8;

/// Extract definition-list items:
///
/// ```text
/// `DD_TRACE_ENABLED`
/// : Enables or disables the tracer, defaulting to true.
/// ```
///
/// The body continues until a heading, a new term line, a table row, or a
/// blank line followed by either of those; one interior blank line is allowed.
pub fn definition_list(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    let lines = &view.lines;
    let mask = &view.code_mask;
    let mut out = Vec::new();

    for i in 0..lines.len().saturating_sub(1) {
        if mask[i] || mask[i + 1] {
            continue;
        }
        let Some(caps) = TERM_LINE_RE.captures(&lines[i]) else {
            continue;
        };
        let term = caps["term"].trim();
        if !ctx.terms.iter().any(|t| t == term) {
            continue;
        }
        if !COLON_LEAD_RE.is_match(&lines[i + 1]) {
            continue;
        }

        let mut parts: Vec<String> = Vec::new();
        let first = COLON_LEAD_RE.replace(&lines[i + 1], "").trim_end().to_string();
        if !first.is_empty() {
            parts.push(first);
        }
        let mut j = i + 2;
        while j < lines.len() && parts.len() < MAX_DEFINITION_LINES {
            if mask[j] {
                break;
            }
            let line = lines[j].trim_end();
            if line.trim().is_empty() {
                let next = lines.get(j + 1).map_or("", String::as_str);
                if looks_like_heading(next) || TERM_LINE_RE.is_match(next) {
                    break;
                }
                parts.push(String::new());
                j += 1;
                continue;
            }
            if looks_like_heading(line) || TERM_LINE_RE.is_match(line) {
                break;
            }
            // Table rows are handled by the table extractor.
            if line.contains('|') && line.trim_start().starts_with('|') {
                break;
            }
            parts.push(line.to_string());
            j += 1;
        }

        let desc = normalize_text(&parts.join("\n"));
        if !desc.is_empty() {
            out.push(RawCandidate {
                text: desc,
                line: i + 2,
                kind: ExtractorKind::DefinitionList,
            });
        }
    }
    out
}

/// Extract the Description cell from tables that have a Description column.
pub fn table(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    let lines = &view.lines;
    let mask = &view.code_mask;
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if mask[i] || !line.contains('|') {
            continue;
        }
        if !ctx.matcher.is_match(line) || TABLE_SEPARATOR_RE.is_match(line) {
            continue;
        }

        let cells = split_row(line);
        if cells.len() < 2 {
            continue;
        }

        // Locate the header row in a short window above this row.
        let mut desc_idx = None;
        for j in (i.saturating_sub(HEADER_WINDOW)..i).rev() {
            let header = &lines[j];
            if header.trim().is_empty() || !header.contains('|') {
                break;
            }
            if TABLE_SEPARATOR_RE.is_match(header) {
                continue;
            }
            desc_idx = split_row(header)
                .iter()
                .position(|c| c.eq_ignore_ascii_case("description"));
            break;
        }

        let Some(idx) = desc_idx else { continue };
        let Some(cell) = cells.get(idx) else { continue };
        let desc = normalize_text(cell);
        if !desc.is_empty() {
            out.push(RawCandidate {
                text: desc,
                line: i + 1,
                kind: ExtractorKind::Table,
            });
            if out.len() >= MAX_TABLE_MATCHES {
                break;
            }
        }
    }
    out
}

/// Extract inline bullets of the shape `- \`DD_FOO\`: description`.
pub fn inline_bullet(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    // Longest term first so an alias that extends the key cannot lose to it.
    let mut terms: Vec<&str> = ctx.terms.iter().map(String::as_str).collect();
    terms.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    terms.dedup();
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let Ok(re) = Regex::new(&format!(
        r"^\s*[-*]\s+`(?:{alternation})`\s*:\s*(?P<desc>.+?)\s*$"
    )) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (i, line) in view.lines.iter().enumerate() {
        if view.code_mask[i] {
            continue;
        }
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let desc = normalize_text(&caps["desc"]);
        if !desc.is_empty() {
            out.push(RawCandidate {
                text: desc,
                line: i + 1,
                kind: ExtractorKind::InlineBullet,
            });
        }
    }
    out
}

/// Split a table row into trimmed cells, tolerating optional outer pipes.
fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|c| c.trim().to_string())
        .collect()
}
