mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use wadocr::{run_acqdatetime, run_qc_series, series_filelist, ModuleConfig, ResultsSink};
use wadocr_ocr::TesseractEngine;

fn run(args: &Args) -> anyhow::Result<()> {
    let config = ModuleConfig::from_file(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    let series = series_filelist(&args.data)?;
    let engine = TesseractEngine::with_language(&args.language);
    let mut sink = ResultsSink::new();

    for (name, action) in &config.actions {
        info!(action = %name, "dispatching action");
        match name.as_str() {
            "acqdatetime" => run_acqdatetime(&series, &mut sink)?,
            "qc_series" => {
                run_qc_series(&series, &action.params, &engine, &args.output_dir, &mut sink)?
            }
            other => bail!("unknown action {other:?} in config"),
        }
    }

    sink.write(&args.results)
        .with_context(|| format!("writing results {}", args.results.display()))?;
    info!(results = %args.results.display(), count = sink.len(), "results written");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "wadocr=info".into()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
