use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confdocs")]
#[command(
    about = "Extract configuration-key descriptions from a documentation corpus",
    long_about = None
)]
pub struct Cli {
    /// Target implementation language (example: "golang")
    #[arg(long)]
    pub lang: String,

    /// Previous-stage JSON listing keys still lacking a description
    #[arg(long, default_value = "./result/configurations_descriptions_step_1.json")]
    pub input: PathBuf,

    /// Local checkout of the documentation corpus
    #[arg(long = "docs-repo", default_value = "./documentation")]
    pub docs_repo: PathBuf,

    /// Alias catalog (supportedConfigurations JSON); optional
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// Directory where the result artifact is written
    #[arg(long, default_value = "./result")]
    pub output: PathBuf,

    /// Max extracted candidates kept per key
    #[arg(long, default_value_t = 3)]
    pub max_results_per_key: usize,

    /// Max matched files considered per key per pass
    #[arg(long, default_value_t = 30)]
    pub max_files_per_key: usize,

    /// Debug diagnostics on stderr (never affects the result artifact)
    #[arg(short, long)]
    pub verbose: bool,
}
