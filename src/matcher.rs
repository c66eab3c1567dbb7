//! Boundary-aware literal term matching.
//!
//! Configuration keys are identifier-shaped, so a term must never match as a
//! substring of a longer identifier (`DD_API_KEY` inside
//! `DD_API_KEY_SECRET_ARN`). The `regex` crate has no lookarounds; instead we
//! compile a plain alternation over the escaped terms and validate both flanks
//! of each raw match against the identifier character class, resuming the
//! search one byte past a rejected start so overlapping occurrences are never
//! shadowed.

use crate::error::Result;
use anyhow::Context;
use regex::Regex;

/// One validated term occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermHit<'t> {
    /// Byte offset of the term in the scanned text.
    pub start: usize,
    /// The matched term, borrowed from the scanned text.
    pub term: &'t str,
}

/// Compiled alternation over a fixed set of literal terms.
#[derive(Debug)]
pub struct TermMatcher {
    re: Regex,
}

/// Characters that extend an identifier; a term flanked by one of these on
/// either side is a substring of a longer identifier and must not count.
fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl TermMatcher {
    /// Compile one alternation for a batch of terms.
    ///
    /// Terms are deduplicated and ordered longest-first so a term that is a
    /// prefix of another never wins the alternation at the same position.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let mut unique: Vec<&str> = terms
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !t.is_empty())
            .collect();
        unique.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        unique.dedup();
        anyhow::ensure!(!unique.is_empty(), "term matcher needs at least one term");

        let pattern = unique
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&pattern).context("compiling term alternation")?;
        Ok(Self { re })
    }

    /// All boundary-valid occurrences, in text order.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<TermHit<'t>> {
        let bytes = text.as_bytes();
        let mut hits = Vec::new();
        let mut at = 0;
        while at <= text.len() {
            let Some(m) = self.re.find_at(text, at) else {
                break;
            };
            let left_ok = m.start() == 0 || !is_identifier_byte(bytes[m.start() - 1]);
            let right_ok = m.end() == text.len() || !is_identifier_byte(bytes[m.end()]);
            if left_ok && right_ok {
                hits.push(TermHit {
                    start: m.start(),
                    term: &text[m.start()..m.end()],
                });
                at = m.end();
            } else {
                // A rejected raw match may shadow a different term starting
                // inside it; resume just past the rejected start.
                at = m.start() + 1;
            }
        }
        hits
    }

    /// Whether the text contains at least one boundary-valid occurrence.
    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }
}
