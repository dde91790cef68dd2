use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Apply transformations to a dataset of price movements represented by a
/// candlestick chart.
#[derive(Parser, Debug)]
#[command(name = "candle-features", version, about)]
struct Cli {
    /// Path to dataset
    dataset: PathBuf,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);
    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let (output, report) = candle_features::transform_file(&cli.dataset)?;
    println!(
        "Wrote {} ({} new column(s)) in {:.2} ms",
        output.display(),
        report.added_columns().len(),
        report.elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}
