//! Upstream catalog input: the pipeline-stage JSON and the alias catalog.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// A `{source, reason}` pair explaining why a key is still undocumented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingReason {
    pub source: String,
    pub reason: String,
}

/// One still-undocumented (key, implementation) pair from the previous stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissingEntry {
    pub key: String,
    pub implementation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_reasons: Vec<MissingReason>,
}

/// One kept description with provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    /// Pipeline source tag (which stage found this description).
    pub source: String,
    /// Extractor kind that produced the text; absent for upstream stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
    /// `path:line` provenance; absent for upstream stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// A documented (key, implementation) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentedEntry {
    pub key: String,
    pub implementation: String,
    pub results: Vec<ResultEntry>,
    /// Rejection history from earlier stages, carried through for review.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_sources: Vec<MissingReason>,
}

/// Parsed previous-stage output: what is documented already and what this run
/// still needs to find.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInput {
    #[serde(default)]
    pub documented_configurations: Vec<DocumentedEntry>,
    #[serde(default)]
    pub missing_configurations: Vec<MissingEntry>,
}

impl StageInput {
    /// Load and validate the previous stage's JSON output.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading stage input {}", path.display()))?;
        let input: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing stage input {}", path.display()))?;
        debug!(
            documented = input.documented_configurations.len(),
            missing = input.missing_configurations.len(),
            "loaded stage input"
        );
        Ok(input)
    }

    /// Missing entries grouped by key, insertion order preserved within a key.
    pub fn missing_by_key(&self) -> BTreeMap<String, Vec<&MissingEntry>> {
        let mut out: BTreeMap<String, Vec<&MissingEntry>> = BTreeMap::new();
        for entry in &self.missing_configurations {
            if entry.key.is_empty() {
                continue;
            }
            out.entry(entry.key.clone()).or_default().push(entry);
        }
        out
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SupportedConfigurations {
    #[serde(default)]
    supported_configurations: BTreeMap<String, Vec<SupportedEntry>>,
}

#[derive(Debug, Deserialize)]
struct SupportedEntry {
    #[serde(default)]
    aliases: Vec<String>,
}

/// Load the alias catalog (`supportedConfigurations` JSON): canonical key →
/// alias strings, order preserved, stable dedup.
///
/// A missing or unparsable catalog degrades to an empty alias map; aliases
/// only widen the search, they are never required for correctness.
pub fn load_alias_map(path: Option<&Path>) -> BTreeMap<String, Vec<String>> {
    let Some(path) = path else {
        return BTreeMap::new();
    };
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("alias catalog {} not readable: {}", path.display(), e);
            return BTreeMap::new();
        }
    };
    let parsed: SupportedConfigurations = match serde_json::from_slice(&bytes) {
        Ok(p) => p,
        Err(e) => {
            warn!("alias catalog {} not parsable: {}", path.display(), e);
            return BTreeMap::new();
        }
    };

    let mut out = BTreeMap::new();
    for (key, entries) in parsed.supported_configurations {
        let mut aliases: Vec<String> = Vec::new();
        for entry in entries {
            for alias in entry.aliases {
                let alias = alias.trim().to_string();
                if !alias.is_empty() && !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            }
        }
        if !aliases.is_empty() {
            out.insert(key, aliases);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stage_input_round_trips_missing_reasons() {
        let json = r#"{
            "documentedConfigurations": [],
            "missingConfigurations": [
                {"key": "DD_ENV", "implementation": "golang",
                 "missingReasons": [{"source": "registry_doc", "reason": "not_found"}]}
            ]
        }"#;
        let input: StageInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.missing_configurations.len(), 1);
        assert_eq!(
            input.missing_configurations[0].missing_reasons[0].reason,
            "not_found"
        );
    }

    #[test]
    fn missing_by_key_groups_entries_per_implementation() {
        let json = r#"{
            "missingConfigurations": [
                {"key": "DD_ENV", "implementation": "golang"},
                {"key": "DD_ENV", "implementation": "java"},
                {"key": "DD_TAGS", "implementation": "golang"}
            ]
        }"#;
        let input: StageInput = serde_json::from_str(json).unwrap();
        let grouped = input.missing_by_key();
        assert_eq!(grouped["DD_ENV"].len(), 2);
        assert_eq!(grouped["DD_TAGS"].len(), 1);
    }

    #[test]
    fn alias_map_flattens_with_stable_dedup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("supported_configurations.json");
        fs::write(
            &path,
            r#"{"supportedConfigurations": {
                "DD_SERVICE": [
                    {"aliases": ["DD_SERVICE_NAME", "DD_TAGS_SERVICE"]},
                    {"aliases": ["DD_SERVICE_NAME"]}
                ],
                "DD_ENV": [{}]
            }}"#,
        )
        .unwrap();
        let map = load_alias_map(Some(&path));
        assert_eq!(map["DD_SERVICE"], ["DD_SERVICE_NAME", "DD_TAGS_SERVICE"]);
        assert!(!map.contains_key("DD_ENV"));
    }

    #[test]
    fn absent_alias_catalog_degrades_to_empty() {
        assert!(load_alias_map(None).is_empty());
        assert!(load_alias_map(Some(Path::new("/does/not/exist.json"))).is_empty());
    }
}
