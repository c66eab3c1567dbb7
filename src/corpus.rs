//! Corpus selection: which documentation files each scan pass looks at.
//!
//! Pass 1 walks a curated set of product-area subtrees plus the reusable
//! content directories. Pass 2 widens to the whole English content tree but
//! keeps only paths containing a known keyword. Both passes admit the same
//! fixed set of text/markup extensions and always skip `.git`.
//!
//! Output order is lexicographic by corpus-relative path. That ordering is the
//! determinism anchor for everything downstream, so it must never depend on
//! the filesystem's directory-listing order.

use crate::config::CorpusConfig;
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// One admitted documentation file.
#[derive(Debug, Clone)]
pub struct DocFile {
    /// Path relative to the corpus root, `/`-separated.
    pub relpath: String,
    pub abspath: PathBuf,
}

/// Enumerates candidate files under the corpus root for each pass.
pub struct CorpusSelector<'a> {
    root: &'a Path,
    cfg: &'a CorpusConfig,
}

/// Localized shared-snippet suffix, e.g. `alerting.fr.md`.
static LOCALE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.([a-z]{2})\.(md|mdx)$").unwrap());

impl<'a> CorpusSelector<'a> {
    pub fn new(root: &'a Path, cfg: &'a CorpusConfig) -> Self {
        Self { root, cfg }
    }

    /// Curated pass-1 file set: seed subtrees plus reusable-content subtrees,
    /// keeping only the ones that exist in this checkout.
    pub fn pass1_files(&self) -> Vec<DocFile> {
        let roots: Vec<&str> = self
            .cfg
            .seed_dirs
            .iter()
            .chain(self.cfg.reusable_dirs.iter())
            .map(String::as_str)
            .collect();
        let files = self.files_under(&roots);
        debug!(files = files.len(), "pass 1 corpus selected");
        files
    }

    /// Broad pass-2 file set, post-filtered by path keywords.
    pub fn pass2_files(&self) -> Vec<DocFile> {
        let mut roots: Vec<&str> = vec![self.cfg.broad_root.as_str()];
        roots.extend(self.cfg.reusable_dirs.iter().map(String::as_str));
        let mut files = self.files_under(&roots);
        files.retain(|f| self.is_pass2_candidate(&f.relpath));
        debug!(files = files.len(), "pass 2 corpus selected (keyword-filtered)");
        files
    }

    fn is_pass2_candidate(&self, relpath: &str) -> bool {
        let lower = relpath.to_lowercase();
        self.cfg.pass2_keywords.iter().any(|k| lower.contains(k))
    }

    fn files_under(&self, roots: &[&str]) -> Vec<DocFile> {
        let mut files: Vec<DocFile> = Vec::new();
        for root_rel in roots {
            let root = self.root.join(root_rel);
            if !root.is_dir() {
                continue;
            }
            // The corpus is not a git working set we must respect; we only
            // want plain recursive enumeration, so standard filters are off.
            let walk = WalkBuilder::new(&root)
                .standard_filters(false)
                .follow_links(false)
                .build();
            for entry in walk {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("skipping unreadable corpus entry: {}", e);
                        continue;
                    }
                };
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let Some(file) = self.admit(entry.path()) else {
                    continue;
                };
                files.push(file);
            }
        }
        files.sort_by(|a, b| a.relpath.cmp(&b.relpath));
        files.dedup_by(|a, b| a.relpath == b.relpath);
        files
    }

    /// Apply the admission rules to one regular file.
    fn admit(&self, path: &Path) -> Option<DocFile> {
        let rel = path.strip_prefix(self.root).ok()?;
        if rel.components().any(|c| c.as_os_str() == ".git") {
            return None;
        }

        let ext = path.extension()?.to_str()?.to_lowercase();
        if !self.cfg.extensions.iter().any(|e| *e == ext) {
            return None;
        }

        let relpath = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        // Shared snippets exist once per locale; keep English only.
        let shortcode_prefix = format!("{}/", self.cfg.shortcode_dir);
        if relpath.starts_with(shortcode_prefix.as_str()) {
            let name = path.file_name()?.to_string_lossy();
            if let Some(caps) = LOCALE_SUFFIX_RE.captures(&name) {
                if !caps[1].eq_ignore_ascii_case("en") {
                    return None;
                }
            }
        }

        Some(DocFile {
            relpath,
            abspath: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relpaths(files: &[DocFile]) -> Vec<&str> {
        files.iter().map(|f| f.relpath.as_str()).collect()
    }

    #[test]
    fn pass1_only_walks_existing_seed_and_reusable_dirs() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "content/en/tracing/setup.md", "x");
        write(tmp.path(), "content/en/dashboards/widgets.md", "x");
        write(tmp.path(), "layouts/shortcodes/tracing-env.md", "x");

        let cfg = CorpusConfig::default();
        let selector = CorpusSelector::new(tmp.path(), &cfg);
        assert_eq!(
            relpaths(&selector.pass1_files()),
            ["content/en/tracing/setup.md", "layouts/shortcodes/tracing-env.md"]
        );
    }

    #[test]
    fn pass2_is_keyword_filtered_over_the_broad_tree() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "content/en/agent/config.md", "x");
        write(tmp.path(), "content/en/dashboards/widgets.md", "x");

        let cfg = CorpusConfig::default();
        let selector = CorpusSelector::new(tmp.path(), &cfg);
        assert_eq!(relpaths(&selector.pass2_files()), ["content/en/agent/config.md"]);
    }

    #[test]
    fn extension_allow_list_and_git_exclusion_apply() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "content/en/tracing/setup.md", "x");
        write(tmp.path(), "content/en/tracing/image.png", "x");
        write(tmp.path(), "content/en/tracing/.git/config.md", "x");

        let cfg = CorpusConfig::default();
        let selector = CorpusSelector::new(tmp.path(), &cfg);
        assert_eq!(relpaths(&selector.pass1_files()), ["content/en/tracing/setup.md"]);
    }

    #[test]
    fn localized_shortcodes_are_dropped_outside_english() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "layouts/shortcodes/env.md", "x");
        write(tmp.path(), "layouts/shortcodes/env.fr.md", "x");
        write(tmp.path(), "layouts/shortcodes/env.en.md", "x");
        // Locale filtering is scoped to the shortcode subtree only.
        write(tmp.path(), "content/en/tracing/notes.fr.md", "x");

        let cfg = CorpusConfig::default();
        let selector = CorpusSelector::new(tmp.path(), &cfg);
        assert_eq!(
            relpaths(&selector.pass1_files()),
            [
                "content/en/tracing/notes.fr.md",
                "layouts/shortcodes/env.en.md",
                "layouts/shortcodes/env.md",
            ]
        );
    }

    #[test]
    fn output_is_sorted_by_relative_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "content/en/tracing/z.md", "x");
        write(tmp.path(), "content/en/tracing/a.md", "x");
        write(tmp.path(), "content/en/profiler/m.md", "x");

        let cfg = CorpusConfig::default();
        let selector = CorpusSelector::new(tmp.path(), &cfg);
        assert_eq!(
            relpaths(&selector.pass1_files()),
            [
                "content/en/profiler/m.md",
                "content/en/tracing/a.md",
                "content/en/tracing/z.md",
            ]
        );
    }
}
