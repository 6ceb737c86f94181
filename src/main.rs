//! # vLLM Deployment Comparison Entry Point
//!
//! Summarises vLLM benchmark metrics by deployment against the `no-features`
//! baseline. For each of `mean_ttft_ms`, `mean_tpot_ms`, `mean_itl_ms` and
//! `request_throughput` a grouped-bar chart with a comparison table is
//! produced.
//!
//! ## Outputs
//! - `summary_<metric>_<model>.png` with `--export-png`.
//! - `summary_<metric>_<model>.html` with `--export-html`.
//! - `summary_<metric>_<model>.csv` with `--export-csv`.
//! - No chart export: the chart opens in the browser and the table is printed.

use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, info, LevelFilter};

use vllm_bench_report::{
    analysis::BASELINE_DEPLOYMENT,
    config::{ExportOptions, ReportConfig},
    report::run,
};

#[derive(Parser, Debug)]
#[command(
    name = "vllm-bench-report",
    version,
    about = format!("Summarize vLLM metrics by deployment (baseline: {BASELINE_DEPLOYMENT}).")
)]
struct Cli {
    /// Input JSONL file (must include 'deployment' and metadata fields).
    #[arg(short, long)]
    file: PathBuf,

    /// Save plots as PNG.
    #[arg(long)]
    export_png: bool,

    /// Save plots as HTML.
    #[arg(long)]
    export_html: bool,

    /// Save comparison tables as CSV.
    #[arg(long)]
    export_csv: bool,

    /// Directory for exported files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug logging including pivot tables.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig {
            input: self.file,
            output_dir: self.output_dir,
            export: ExportOptions {
                png: self.export_png,
                html: self.export_html,
                csv: self.export_csv,
            },
            verbose: self.debug,
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = cli.into_config();
    match run(&config) {
        Ok(outcome) => {
            info!(
                "Done: {} charts, {} skipped, {} failed, {} files written",
                outcome.rendered.len(),
                outcome.skipped.len(),
                outcome.failed.len(),
                outcome.written.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
