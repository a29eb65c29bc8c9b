use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use cartera_tools::analyze::{self, Report};
use cartera_tools::config::ExtractionConfig;
use cartera_tools::io::excel_write;
use cartera_tools::model::UnitRecord;
use cartera_tools::summary::PortfolioSummary;
use cartera_tools::{Result, ToolError};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: {error}");
    }

    let Some(input) = cli.input.clone() else {
        print_report(&Report::failed("No input file provided"));
        std::process::exit(1);
    };

    let report = Report::from(run(&cli, &input));
    if let Err(error) = emit(&cli, &report) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, input: &Path) -> Result<Vec<UnitRecord>> {
    let config = match &cli.config {
        Some(path) => ExtractionConfig::load(path)?,
        None => ExtractionConfig::default(),
    };

    let records = analyze::analyze_workbook(input, &config)?;

    if cli.summary.is_some() || cli.export.is_some() {
        let summary = PortfolioSummary::from_records(&records);
        if let Some(path) = &cli.summary {
            fs::write(path, serde_json::to_string_pretty(&summary)?)?;
            info!(path = %path.display(), "summary written");
        }
        if let Some(path) = &cli.export {
            excel_write::write_report(path, &records, &summary)?;
            info!(path = %path.display(), "analysis workbook written");
        }
    }

    Ok(records)
}

fn emit(cli: &Cli, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    match serde_json::to_string(report) {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("error: {error}"),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Extract unit debts from billing statement workbooks and classify delinquency."
)]
struct Cli {
    /// Statement workbook; only its first sheet is read.
    input: Option<PathBuf>,

    /// JSON file overriding labels, thresholds and window bounds.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON records here instead of standard output.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write a portfolio summary as JSON.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Also write the analysis table as an Excel workbook.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log per-unit extraction details to standard error.
    #[arg(short, long)]
    verbose: bool,
}
