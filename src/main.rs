use anyhow::{Context, ensure};
use clap::Parser;
use confdocs::catalog::{StageInput, load_alias_map};
use confdocs::cli::Cli;
use confdocs::{Engine, ScanConfig};

mod tracing;

/// Name of the artifact this stage writes into the output directory.
const OUTPUT_FILENAME: &str = "configurations_descriptions_step_2.json";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing::init(cli.verbose);

    ensure!(
        cli.input.is_file(),
        "input file not found: {}",
        cli.input.display()
    );
    ensure!(
        cli.docs_repo.is_dir(),
        "docs repo not found: {}",
        cli.docs_repo.display()
    );

    let input = StageInput::load(&cli.input)?;
    let alias_map = load_alias_map(cli.aliases.as_deref());

    let cfg = ScanConfig::for_language(&cli.lang, cli.max_results_per_key, cli.max_files_per_key);
    let artifact = Engine::new(cfg)
        .run(&input, &alias_map, &cli.docs_repo)
        .context("documentation extraction failed")?;

    let output_path = cli.output.join(OUTPUT_FILENAME);
    artifact.write_atomic(&output_path)?;
    Ok(())
}
