//! Search-term index for the configuration-key catalog.
//!
//! Each canonical key expands into the literal terms we look for in the docs:
//! the key itself, a hyphenated variant when the key contains underscores
//! (docs frequently spell `DD_FOO_BAR` as `DD-FOO-BAR` in prose), and any
//! catalog aliases in their original order.

use crate::error::{Result, TermIndexError};
use std::collections::BTreeMap;

/// Key → search terms plus the reverse term → key lookup.
#[derive(Debug, Default)]
pub struct TermIndex {
    key_to_terms: BTreeMap<String, Vec<String>>,
    term_to_key: BTreeMap<String, String>,
}

impl TermIndex {
    /// Build the index from canonical keys and their alias catalog.
    ///
    /// Terms are deduplicated stably (first occurrence wins) per key. A term
    /// claimed by two different keys is a catalog defect and fails the run.
    pub fn build(keys: &[String], alias_map: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut index = Self::default();

        for key in keys {
            if key.is_empty() || index.key_to_terms.contains_key(key) {
                continue;
            }

            let mut terms: Vec<String> = vec![key.clone()];
            if key.contains('_') {
                terms.push(key.replace('_', "-"));
            }
            if let Some(aliases) = alias_map.get(key) {
                terms.extend(aliases.iter().filter(|a| !a.is_empty()).cloned());
            }

            let mut deduped: Vec<String> = Vec::with_capacity(terms.len());
            for term in terms {
                if deduped.contains(&term) {
                    continue;
                }
                deduped.push(term);
            }

            for term in &deduped {
                if let Some(existing) = index.term_to_key.get(term) {
                    if existing != key {
                        return Err(TermIndexError::TermConflict {
                            term: term.clone(),
                            first_key: existing.clone(),
                            second_key: key.clone(),
                        }
                        .into());
                    }
                    continue;
                }
                index.term_to_key.insert(term.clone(), key.clone());
            }
            index.key_to_terms.insert(key.clone(), deduped);
        }

        Ok(index)
    }

    /// All search terms for one key; `terms[0]` is always the key itself.
    pub fn terms_for(&self, key: &str) -> &[String] {
        self.key_to_terms.get(key).map_or(&[], Vec::as_slice)
    }

    /// Resolve a matched term back to its canonical key.
    pub fn key_for_term(&self, term: &str) -> Option<&str> {
        self.term_to_key.get(term).map(String::as_str)
    }

    /// Every term belonging to one of the given keys, in key order.
    ///
    /// Used to build the scan-batch alternation for a subset of keys
    /// (pass 2 only rescans the keys pass 1 left unresolved).
    pub fn terms_for_keys(&self, keys: &[String]) -> Vec<String> {
        let mut out = Vec::new();
        for key in keys {
            out.extend(self.terms_for(key).iter().cloned());
        }
        out
    }
}
