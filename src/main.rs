mod cli;
mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sched_fetch_core::{FragmentSelector, HttpSource, OutputDir, Pipeline, RunSummary};

use cli::Cli;

fn main() {
    let cli = Cli::parse_normalized();
    logging::init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "error:".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let output = OutputDir::resolve(cli.destination_path())?;
    let source = HttpSource::new()?;
    let selector = FragmentSelector::sched()?;

    let pipeline = Pipeline::new(source, output, selector).strict(cli.strict);

    let summary = pipeline
        .run_file(cli.ics_path())
        .with_context(|| format!("Failed to archive events from {}", cli.ics_path().display()))?;

    eprintln!("{}", summary_line(&summary, pipeline.output().root()));

    Ok(())
}

fn summary_line(summary: &RunSummary, root: &Path) -> String {
    format!(
        "Wrote {} events to {} ({} non-event components skipped)",
        summary.events_written(),
        root.display(),
        summary.skipped
    )
}
