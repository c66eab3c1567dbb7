//! Run configuration for a scan batch.
//!
//! Everything that influences the result artifact lives here as explicit,
//! immutable values handed to the selector/scanner/ranker at construction.
//! Two runs (e.g. for different tracer languages) never share hidden state.

/// Documentation areas scanned first. Pass 1 stays narrow and high-precision;
/// only subtrees that actually exist under the corpus root are used.
const PASS1_SEED_DIRS: &[&str] = &[
    "content/en/tracing",
    "content/en/serverless",
    "content/en/profiler",
    "content/en/security",
    "content/en/opentelemetry",
    "content/en/continuous_integration",
];

/// Reusable-content subtrees (shortcodes/partials/data) included in both passes.
const REUSABLE_DIRS: &[&str] = &["layouts/shortcodes", "layouts/partials", "data"];

/// Pass 2 widens to the whole English content tree, restricted to paths that
/// contain at least one of these keywords.
const PASS2_PATH_KEYWORDS: &[&str] = &[
    "tracing",
    "apm",
    "agent",
    "serverless",
    "profiling",
    "profiler",
    "opentelemetry",
    "security",
    "appsec",
    "civisibility",
    "continuous_integration",
    "test",
    "otel",
];

/// File extensions admitted into the corpus.
const DOC_EXTENSIONS: &[&str] = &["md", "mdx", "yaml", "yml", "json"];

/// Path fragments that mark a file as a changelog/release-note dump (penalized).
const PATH_PENALTY_TOKENS: &[&str] = &["release", "changelog"];

/// Path fragments for recognized product areas (rewarded).
const PATH_BONUS_TOKENS: &[&str] = &[
    "tracing",
    "apm",
    "serverless",
    "profil",
    "opentelemetry",
    "security",
    "appsec",
];

/// Corpus selection and path-scoring knobs shared by both scan passes.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    pub seed_dirs: Vec<String>,
    pub reusable_dirs: Vec<String>,
    /// Root of the broad pass (pass 2), before keyword filtering.
    pub broad_root: String,
    pub pass2_keywords: Vec<String>,
    pub extensions: Vec<String>,
    /// Subtree in which localized `*.xx.md` shared snippets are dropped.
    pub shortcode_dir: String,
    pub path_penalty_tokens: Vec<String>,
    pub path_bonus_tokens: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let own = |xs: &[&str]| xs.iter().map(ToString::to_string).collect();
        Self {
            seed_dirs: own(PASS1_SEED_DIRS),
            reusable_dirs: own(REUSABLE_DIRS),
            broad_root: "content/en".to_string(),
            pass2_keywords: own(PASS2_PATH_KEYWORDS),
            extensions: own(DOC_EXTENSIONS),
            shortcode_dir: "layouts/shortcodes".to_string(),
            path_penalty_tokens: own(PATH_PENALTY_TOKENS),
            path_bonus_tokens: own(PATH_BONUS_TOKENS),
        }
    }
}

/// Full configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target implementation language identifier (e.g. "golang").
    pub lang: String,
    /// Path tokens that mark a file as belonging to the target language.
    pub lang_hints: Vec<String>,
    /// Maximum kept results per key after ranking.
    pub max_results_per_key: usize,
    /// Maximum matched files considered per key per pass.
    pub max_files_per_key: usize,
    pub corpus: CorpusConfig,
}

impl ScanConfig {
    /// Build a configuration for one target language with the given caps.
    ///
    /// Caps are clamped to at least 1 so a misconfigured run still produces
    /// bounded, non-empty behavior rather than panicking downstream.
    pub fn for_language(lang: &str, max_results_per_key: usize, max_files_per_key: usize) -> Self {
        Self {
            lang: lang.to_string(),
            lang_hints: lang_hints(lang),
            max_results_per_key: max_results_per_key.max(1),
            max_files_per_key: max_files_per_key.max(1),
            corpus: CorpusConfig::default(),
        }
    }
}

/// Path tokens associated with a tracer language.
///
/// Unknown languages fall back to the identifier itself.
pub fn lang_hints(lang: &str) -> Vec<String> {
    let hints: &[&str] = match lang {
        "golang" => &["golang", "go"],
        "java" => &["java"],
        "python" => &["python"],
        "ruby" => &["ruby"],
        "nodejs" => &["nodejs", "node"],
        "dotnet" => &["dotnet", "csharp"],
        "php" => &["php"],
        other => return vec![other.to_string()],
    };
    hints.iter().map(ToString::to_string).collect()
}
