//! Occurrence scanning: which files mention which keys, and how promisingly.
//!
//! One boundary-aware alternation is compiled per scan batch (not per term)
//! and run over every selected file in canonical path order. Only the first
//! occurrence of each distinct term within a file is recorded, so a file that
//! repeats a term hundreds of times yields one match. Per-key match lists are
//! then sorted by the canonical tuple and truncated; that tuple is the
//! determinism anchor for everything downstream.

use crate::config::ScanConfig;
use crate::corpus::DocFile;
use crate::error::Result;
use crate::matcher::TermMatcher;
use crate::terms::TermIndex;
use ahash::AHashSet;
use anyhow::Context;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// One search-term occurrence in one file.
#[derive(Debug, Clone)]
pub struct FileMatch {
    /// Corpus-relative path, `/`-separated.
    pub relpath: String,
    pub abspath: PathBuf,
    /// Scan pass that produced this match (1 or 2).
    pub pass: u8,
    /// Byte offset of the first occurrence of the term in the file.
    pub offset: usize,
    /// Whether the file path carries a target-language hint token.
    pub has_lang_hint: bool,
    /// Path-quality penalty/bonus; lower is better.
    pub path_quality: i32,
}

impl FileMatch {
    /// Canonical ordering tuple: pass, hint, path quality, path, offset.
    fn sort_key(&self) -> (u8, u8, i32, &str, usize) {
        (
            self.pass,
            u8::from(!self.has_lang_hint),
            self.path_quality,
            &self.relpath,
            self.offset,
        )
    }
}

/// Scans corpus files for term occurrences on behalf of one run.
pub struct Scanner<'a> {
    index: &'a TermIndex,
    cfg: &'a ScanConfig,
    hint_re: Option<Regex>,
}

impl<'a> Scanner<'a> {
    pub fn new(index: &'a TermIndex, cfg: &'a ScanConfig) -> Result<Self> {
        let hint_re = if cfg.lang_hints.is_empty() {
            None
        } else {
            // Hints match on path-token boundaries: `go` hits `tracing/go/`
            // but not `golang` (which is its own hint where relevant).
            let alternation = cfg
                .lang_hints
                .iter()
                .map(|h| regex::escape(&h.to_lowercase()))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"(?:^|[^a-z0-9])(?:{alternation})(?:[^a-z0-9]|$)"))
                    .context("compiling language-hint pattern")?,
            )
        };
        Ok(Self { index, cfg, hint_re })
    }

    /// Scan `files` for occurrences of any term of the given keys.
    ///
    /// Returns per-key match lists, sorted canonically and truncated to the
    /// per-key file cap.
    pub fn scan(
        &self,
        files: &[DocFile],
        keys: &[String],
        pass: u8,
    ) -> Result<BTreeMap<String, Vec<FileMatch>>> {
        let mut out: BTreeMap<String, Vec<FileMatch>> = BTreeMap::new();

        let terms = self.index.terms_for_keys(keys);
        if terms.is_empty() || files.is_empty() {
            return Ok(out);
        }
        let matcher = TermMatcher::new(&terms)
            .with_context(|| format!("building scan alternation for pass {pass}"))?;

        for file in files {
            let bytes = match std::fs::read(&file.abspath) {
                Ok(b) => b,
                Err(e) => {
                    warn!("skipping unreadable file {}: {}", file.relpath, e);
                    continue;
                }
            };
            let content = String::from_utf8_lossy(&bytes);

            let has_lang_hint = self.path_has_hint(&file.relpath);
            let path_quality = self.path_quality(&file.relpath);

            // First occurrence per distinct term only.
            let mut seen: AHashSet<&str> = AHashSet::new();
            for hit in matcher.find_all(&content) {
                if !seen.insert(hit.term) {
                    continue;
                }
                let Some(key) = self.index.key_for_term(hit.term) else {
                    continue;
                };
                trace!(key, term = hit.term, file = %file.relpath, "term occurrence");
                out.entry(key.to_string()).or_default().push(FileMatch {
                    relpath: file.relpath.clone(),
                    abspath: file.abspath.clone(),
                    pass,
                    offset: hit.start,
                    has_lang_hint,
                    path_quality,
                });
            }
        }

        for (key, matches) in &mut out {
            matches.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
            matches.truncate(self.cfg.max_files_per_key);
            trace!(key, matches = matches.len(), pass, "bounded file matches");
        }
        debug!(
            pass,
            keys_matched = out.len(),
            files = files.len(),
            "scan pass complete"
        );
        Ok(out)
    }

    fn path_has_hint(&self, relpath: &str) -> bool {
        self.hint_re
            .as_ref()
            .is_some_and(|re| re.is_match(&relpath.to_lowercase()))
    }

    /// Penalize changelog-ish paths, reward recognized product areas.
    fn path_quality(&self, relpath: &str) -> i32 {
        let lower = relpath.to_lowercase();
        let mut score = 0;
        if self
            .cfg
            .corpus
            .path_penalty_tokens
            .iter()
            .any(|t| lower.contains(t))
        {
            score += 50;
        }
        if self
            .cfg
            .corpus
            .path_bonus_tokens
            .iter()
            .any(|t| lower.contains(t))
        {
            score -= 10;
        }
        score
    }
}
