//! Format-aware candidate extraction.
//!
//! Every extractor implements the same contract: file lines + code-context
//! mask + search terms in, zero or more literal candidates out. The engine
//! tries the strategies for a file's format in precedence order and stops at
//! the first strategy whose candidates survive the quality bar; the prose
//! fallback only runs when every structured strategy came up empty. That keeps
//! the precedence declarative and lets new formats slot in without touching
//! ranking.

pub mod markdown;
pub mod normalize;
pub mod prose;
pub mod structured;

use crate::quality::passes_quality_bar;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Documentation file format, dispatched on by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Markdown,
    Yaml,
    Json,
}

impl DocFormat {
    /// Classify a corpus-relative path by its extension.
    pub fn from_relpath(relpath: &str) -> Option<Self> {
        let ext = relpath.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "md" | "mdx" => Some(Self::Markdown),
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Which extractor produced a candidate. Order of declaration is also the
/// ranking precedence (see [`ExtractorKind::precedence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    DefinitionList,
    Table,
    InlineBullet,
    YamlBlock,
    YamlScalar,
    JsonValue,
    Prose,
}

impl ExtractorKind {
    /// Ranking precedence; lower is better. Structured definitions beat
    /// tables and bullets, serialized-data fields beat prose.
    pub fn precedence(self) -> u8 {
        match self {
            Self::DefinitionList => 0,
            Self::Table => 1,
            Self::InlineBullet => 2,
            Self::YamlBlock => 3,
            Self::YamlScalar => 4,
            Self::JsonValue => 5,
            Self::Prose => 9,
        }
    }

    /// Stable tag recorded in the output artifact's provenance.
    pub fn tag(self) -> &'static str {
        match self {
            Self::DefinitionList => "definition_list",
            Self::Table => "table",
            Self::InlineBullet => "inline_bullet",
            Self::YamlBlock => "yaml_block",
            Self::YamlScalar => "yaml_scalar",
            Self::JsonValue => "json_value",
            Self::Prose => "prose_paragraph",
        }
    }
}

/// One extracted snippet, before file provenance is attached.
#[derive(Debug, Clone)]
pub struct RawCandidate {
    /// Normalized, verbatim snippet text.
    pub text: String,
    /// 1-based line number of the captured text.
    pub line: usize,
    pub kind: ExtractorKind,
}

/// A file's content prepared for extraction: split lines plus the
/// code-context mask (computed once per file).
#[derive(Debug)]
pub struct FileView {
    pub format: DocFormat,
    pub lines: Vec<String>,
    pub code_mask: Vec<bool>,
}

impl FileView {
    pub fn new(format: DocFormat, content: &str) -> Self {
        let content = content.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<String> = content.split('\n').map(ToString::to_string).collect();
        let code_mask = build_code_mask(&lines);
        Self {
            format,
            lines,
            code_mask,
        }
    }
}

/// Per-match inputs shared by all strategies. Only the prose fallback uses
/// the match line and key; the structured extractors scan whole files.
#[derive(Debug)]
pub struct MatchContext<'a> {
    pub key: &'a str,
    pub terms: &'a [String],
    /// Boundary-aware matcher over `terms`, compiled once per key.
    pub matcher: &'a crate::matcher::TermMatcher,
    /// 0-based line index of the term occurrence that selected this file.
    pub match_line: usize,
}

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(```|~~~)").unwrap());
static HIGHLIGHT_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{[<%]\s*highlight\b").unwrap());
static HIGHLIGHT_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{[<%]\s*/highlight\b").unwrap());
static CODE_BLOCK_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{[<%]\s*code-block\b").unwrap());
static CODE_BLOCK_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{\{[<%]\s*/code-block\b").unwrap());

/// Mark lines inside fenced code or code-rendering shortcodes. Fence and
/// marker lines themselves count as code context.
pub fn build_code_mask(lines: &[String]) -> Vec<bool> {
    let mut in_fence = false;
    let mut in_highlight = false;
    let mut in_code_block = false;
    let mut mask = vec![false; lines.len()];

    for (i, line) in lines.iter().enumerate() {
        if FENCE_RE.is_match(line) {
            mask[i] = true;
            in_fence = !in_fence;
            continue;
        }
        if HIGHLIGHT_START_RE.is_match(line) {
            mask[i] = true;
            in_highlight = true;
            continue;
        }
        if HIGHLIGHT_END_RE.is_match(line) {
            mask[i] = true;
            in_highlight = false;
            continue;
        }
        if CODE_BLOCK_START_RE.is_match(line) {
            mask[i] = true;
            in_code_block = true;
            continue;
        }
        if CODE_BLOCK_END_RE.is_match(line) {
            mask[i] = true;
            in_code_block = false;
            continue;
        }
        mask[i] = in_fence || in_highlight || in_code_block;
    }
    mask
}

/// A heading line (`# ...` through `###### ...`).
pub(crate) fn looks_like_heading(line: &str) -> bool {
    static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s+").unwrap());
    HEADING_RE.is_match(line)
}

/// Run the extractor chain for one file match.
///
/// Strategies are tried in precedence order for the file's format; the first
/// one producing at least one candidate that survives the quality bar wins.
/// Returns the surviving candidates of that strategy.
pub fn extract_candidates(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    type Strategy = fn(&FileView, &MatchContext<'_>) -> Vec<RawCandidate>;

    let chain: &[Strategy] = match view.format {
        DocFormat::Markdown => &[
            markdown::definition_list,
            markdown::table,
            markdown::inline_bullet,
            prose::prose_paragraph,
        ],
        DocFormat::Yaml => &[structured::yaml_key_value],
        DocFormat::Json => &[structured::json_key_value],
    };

    for strategy in chain {
        let mut found = strategy(view, ctx);
        found.retain(|c| {
            let ok = passes_quality_bar(&c.text);
            if !ok {
                trace!(key = ctx.key, line = c.line, "candidate rejected by quality bar");
            }
            ok
        });
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
