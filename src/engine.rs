//! Run orchestration: passes, extraction, ranking, record assembly.
//!
//! Pass 1 scans the curated corpus for every key. Pass 2 widens the corpus
//! but only for keys that pass 1 left without a single file match; a key with
//! any pass-1 match is never escalated. Extraction then walks each key's
//! bounded, canonically ordered file matches, and ranking picks the final
//! results.

use crate::catalog::{DocumentedEntry, MissingEntry, MissingReason, ResultEntry, StageInput};
use crate::config::ScanConfig;
use crate::corpus::CorpusSelector;
use crate::error::Result;
use crate::extract::{DocFormat, FileView, MatchContext, extract_candidates};
use crate::matcher::TermMatcher;
use crate::output::Artifact;
use crate::rank::{Candidate, rank_and_dedupe};
use crate::scan::{FileMatch, Scanner};
use crate::terms::TermIndex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pipeline source tag recorded on every result and missing reason this
/// stage produces.
pub const SOURCE_TAG: &str = "documentation_same_language";

/// Reason code: no file in either pass mentioned the key.
pub const REASON_NOT_FOUND: &str = "not_found";
/// Reason code: files matched but every candidate failed the quality bar.
pub const REASON_QUALITY: &str = "quality";

/// Soft multiplier on the per-key result cap; extraction stops collecting raw
/// candidates once this many have accumulated.
const RAW_CANDIDATE_FACTOR: usize = 6;

/// One configured extraction run.
pub struct Engine {
    cfg: ScanConfig,
}

impl Engine {
    pub fn new(cfg: ScanConfig) -> Self {
        Self { cfg }
    }

    /// Execute the full scan/extract/rank pipeline over the corpus.
    pub fn run(
        &self,
        input: &StageInput,
        alias_map: &BTreeMap<String, Vec<String>>,
        docs_root: &Path,
    ) -> Result<Artifact> {
        let missing_by_key = input.missing_by_key();
        let keys: Vec<String> = missing_by_key.keys().cloned().collect();
        info!(
            documented = input.documented_configurations.len(),
            missing = input.missing_configurations.len(),
            unique_keys = keys.len(),
            "starting documentation extraction"
        );

        let index = TermIndex::build(&keys, alias_map)?;
        let selector = CorpusSelector::new(docs_root, &self.cfg.corpus);
        let scanner = Scanner::new(&index, &self.cfg)?;

        let pass1_files = selector.pass1_files();
        let pass1_matches = scanner.scan(&pass1_files, &keys, 1)?;

        // Escalate only the keys pass 1 resolved nothing for.
        let remaining: Vec<String> = keys
            .iter()
            .filter(|k| !pass1_matches.contains_key(*k))
            .cloned()
            .collect();
        let pass2_matches = if remaining.is_empty() {
            BTreeMap::new()
        } else {
            debug!(keys = remaining.len(), "escalating unresolved keys to pass 2");
            let pass2_files = selector.pass2_files();
            scanner.scan(&pass2_files, &remaining, 2)?
        };

        let mut documented: Vec<DocumentedEntry> = input.documented_configurations.clone();
        let mut missing: Vec<MissingEntry> = Vec::new();

        for (key, entries) in &missing_by_key {
            // Both per-pass lists are already in canonical order and pass id
            // leads the sort tuple, so concatenation preserves it.
            let mut file_matches: Vec<&FileMatch> = Vec::new();
            if let Some(m) = pass1_matches.get(key) {
                file_matches.extend(m.iter());
            }
            if let Some(m) = pass2_matches.get(key) {
                file_matches.extend(m.iter());
            }

            let candidates = self.extract_for_key(key, &index, &file_matches)?;
            let ranked = rank_and_dedupe(key, candidates, self.cfg.max_results_per_key);

            if ranked.is_empty() {
                let reason = if file_matches.is_empty() {
                    REASON_NOT_FOUND
                } else {
                    REASON_QUALITY
                };
                debug!(key, reason, matches = file_matches.len(), "key stays missing");
                for entry in entries {
                    let mut reasons = entry.missing_reasons.clone();
                    reasons.push(MissingReason {
                        source: SOURCE_TAG.to_string(),
                        reason: reason.to_string(),
                    });
                    missing.push(MissingEntry {
                        key: key.clone(),
                        implementation: entry.implementation.clone(),
                        missing_reasons: reasons,
                    });
                }
                continue;
            }

            let results: Vec<ResultEntry> = ranked
                .iter()
                .map(|c| ResultEntry {
                    description: c.text.clone(),
                    short_description: String::new(),
                    source: SOURCE_TAG.to_string(),
                    extractor: Some(c.kind.tag().to_string()),
                    source_file: Some(c.source_ref()),
                })
                .collect();
            debug!(
                key,
                results = results.len(),
                first = %ranked[0].source_ref(),
                "key documented"
            );
            for entry in entries {
                documented.push(DocumentedEntry {
                    key: key.clone(),
                    implementation: entry.implementation.clone(),
                    results: results.clone(),
                    missing_sources: entry.missing_reasons.clone(),
                });
            }
        }

        Ok(Artifact::new(self.cfg.lang.clone(), documented, missing))
    }

    /// Run the extractor chain over each of the key's file matches, in match
    /// order, until the raw-candidate soft bound is reached.
    fn extract_for_key(
        &self,
        key: &str,
        index: &TermIndex,
        file_matches: &[&FileMatch],
    ) -> Result<Vec<Candidate>> {
        let terms = index.terms_for(key);
        if terms.is_empty() || file_matches.is_empty() {
            return Ok(Vec::new());
        }
        let matcher = TermMatcher::new(terms)?;
        let soft_bound = self.cfg.max_results_per_key * RAW_CANDIDATE_FACTOR;

        let mut out: Vec<Candidate> = Vec::new();
        for fm in file_matches {
            if out.len() >= soft_bound {
                break;
            }
            let Some(format) = DocFormat::from_relpath(&fm.relpath) else {
                continue;
            };
            let bytes = match std::fs::read(&fm.abspath) {
                Ok(b) => b,
                Err(e) => {
                    warn!("skipping unreadable file {}: {}", fm.relpath, e);
                    continue;
                }
            };
            let content = String::from_utf8_lossy(&bytes);
            let match_line = content.as_bytes()[..fm.offset.min(content.len())]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();

            let view = FileView::new(format, &content);
            let ctx = MatchContext {
                key,
                terms,
                matcher: &matcher,
                match_line,
            };
            for raw in extract_candidates(&view, &ctx) {
                out.push(Candidate {
                    text: raw.text,
                    relpath: fm.relpath.clone(),
                    line: raw.line,
                    kind: raw.kind,
                    pass: fm.pass,
                    has_lang_hint: fm.has_lang_hint,
                    path_quality: fm.path_quality,
                });
            }
        }
        Ok(out)
    }
}
