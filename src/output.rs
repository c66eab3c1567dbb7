//! The result artifact and its atomic persistence.
//!
//! The artifact is pure data: no timestamps, no run metadata, stable field
//! and entry order. Two runs over the same inputs serialize byte-identically.

use crate::catalog::{DocumentedEntry, MissingEntry};
use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Final output of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub lang: String,
    pub missing_count: usize,
    pub documented_count: usize,
    pub documented_configurations: Vec<DocumentedEntry>,
    pub missing_configurations: Vec<MissingEntry>,
}

impl Artifact {
    pub fn new(
        lang: String,
        mut documented: Vec<DocumentedEntry>,
        mut missing: Vec<MissingEntry>,
    ) -> Self {
        documented.sort_by(|a, b| {
            (a.key.as_str(), a.implementation.as_str())
                .cmp(&(b.key.as_str(), b.implementation.as_str()))
        });
        missing.sort_by(|a, b| {
            (a.key.as_str(), a.implementation.as_str())
                .cmp(&(b.key.as_str(), b.implementation.as_str()))
        });
        Self {
            lang,
            missing_count: missing.len(),
            documented_count: documented.len(),
            documented_configurations: documented,
            missing_configurations: missing,
        }
    }

    /// Serialize to the canonical on-disk representation.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self).context("serializing artifact")?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Persist atomically: write a sibling temp file, then rename over the
    /// target. A crash mid-run never leaves a partially written artifact.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
        let bytes = self.to_json_bytes()?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);
        std::fs::write(tmp, &bytes)
            .with_context(|| format!("writing temporary artifact {}", tmp.display()))?;
        std::fs::rename(tmp, path)
            .with_context(|| format!("renaming artifact into place at {}", path.display()))?;

        info!(
            path = %path.display(),
            documented = self.documented_count,
            missing = self.missing_count,
            "wrote result artifact"
        );
        Ok(())
    }
}
