//! Deterministic ranking and deduplication of accepted candidates.
//!
//! The sort key is the single source of truth for result order: extractor
//! precedence, then scan pass, then language-hint presence, then how many
//! other configuration keys the text mentions (fewer reads as more specific),
//! then text length, path quality, path, and line. Ties cannot survive the
//! final two components, so the order never depends on input arrival order.

use crate::extract::ExtractorKind;
use crate::extract::normalize::{count_other_config_tokens, normalize_for_dedupe};
use ahash::AHashSet;

/// An accepted candidate with full provenance, ready for ranking.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Normalized, verbatim description text.
    pub text: String,
    /// Corpus-relative path of the source file.
    pub relpath: String,
    /// 1-based line number of the captured text.
    pub line: usize,
    pub kind: ExtractorKind,
    /// Scan pass that matched the source file (1 or 2).
    pub pass: u8,
    pub has_lang_hint: bool,
    pub path_quality: i32,
}

impl Candidate {
    /// `path:line` provenance reference recorded in the output artifact.
    pub fn source_ref(&self) -> String {
        format!("{}:{}", self.relpath, self.line)
    }
}

type SortKey = (u8, u8, u8, usize, usize, i32, String, usize);

fn sort_key(key: &str, c: &Candidate) -> SortKey {
    (
        c.kind.precedence(),
        c.pass,
        u8::from(!c.has_lang_hint),
        count_other_config_tokens(&c.text, key),
        c.text.chars().count(),
        c.path_quality,
        c.relpath.clone(),
        c.line,
    )
}

/// Order candidates for one key, drop duplicates by normalized text (keeping
/// the best-ranked source), and truncate to `max_results`.
pub fn rank_and_dedupe(key: &str, candidates: Vec<Candidate>, max_results: usize) -> Vec<Candidate> {
    let mut keyed: Vec<(SortKey, Candidate)> = candidates
        .into_iter()
        .map(|c| (sort_key(key, &c), c))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen: AHashSet<String> = AHashSet::new();
    let mut out = Vec::new();
    for (_, candidate) in keyed {
        if !seen.insert(normalize_for_dedupe(&candidate.text)) {
            continue;
        }
        out.push(candidate);
        if out.len() >= max_results {
            break;
        }
    }
    out
}
