//! Shared test fixtures for integration tests.
//!
//! Each test builds a throwaway documentation corpus inside a temp directory
//! and drives the engine end to end over it. The corpus layout mirrors the
//! real documentation tree (`content/en/...`, `layouts/shortcodes/...`) so
//! pass selection behaves exactly as in production.

use confdocs::catalog::{MissingEntry, StageInput};
use confdocs::{Artifact, Engine, ScanConfig};
use rstest::fixture;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary documentation corpus for one test.
pub struct CorpusFixture {
    temp: TempDir,
}

impl CorpusFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp corpus"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write one corpus file, creating parent directories as needed.
    pub fn write(&self, relpath: &str, content: &str) {
        let path = self.temp.path().join(relpath);
        fs::create_dir_all(path.parent().expect("file path has a parent"))
            .expect("create corpus dirs");
        fs::write(path, content).expect("write corpus file");
    }
}

#[fixture]
pub fn corpus() -> CorpusFixture {
    CorpusFixture::new()
}

/// Build a previous-stage input with the given (key, implementation) pairs
/// still missing and nothing documented yet.
pub fn stage_input(pairs: &[(&str, &str)]) -> StageInput {
    StageInput {
        documented_configurations: Vec::new(),
        missing_configurations: pairs
            .iter()
            .map(|(key, implementation)| MissingEntry {
                key: (*key).to_string(),
                implementation: (*implementation).to_string(),
                missing_reasons: Vec::new(),
            })
            .collect(),
    }
}

/// Run the engine for golang with default caps over the fixture corpus.
pub fn run_engine(corpus: &CorpusFixture, input: &StageInput) -> Artifact {
    run_engine_with_aliases(corpus, input, &BTreeMap::new())
}

pub fn run_engine_with_aliases(
    corpus: &CorpusFixture,
    input: &StageInput,
    alias_map: &BTreeMap<String, Vec<String>>,
) -> Artifact {
    let cfg = ScanConfig::for_language("golang", 3, 30);
    Engine::new(cfg)
        .run(input, alias_map, corpus.root())
        .expect("engine run succeeds")
}
