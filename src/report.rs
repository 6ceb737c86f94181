//! End-to-end report run: load → metadata → per-metric aggregate/compare/render.
//!
//! Load-stage failures abort the run. After that each metric is processed on
//! its own; a failing metric is logged and the next one is attempted.

use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::analysis::{
    aggregate::{aggregate, BASELINE_DEPLOYMENT},
    compare::compare_table,
    metric::Metric,
};
use crate::config::ReportConfig;
use crate::data::{loader::load_records, metadata::{capitalize, RunMetadata}, record::RecordTable};
use crate::error::{ReportError, Result};
use crate::render::{self, ChartReport};

/// What a run produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportOutcome {
    pub rendered: Vec<Metric>,
    /// Metrics absent from the data.
    pub skipped: Vec<Metric>,
    /// Metrics whose chart failed; the error text is logged.
    pub failed: Vec<Metric>,
    pub written: Vec<PathBuf>,
}

pub fn run(config: &ReportConfig) -> Result<ReportOutcome> {
    if !config.input.exists() {
        return Err(ReportError::InputNotFound(config.input.clone()));
    }

    let table = load_records(&config.input)?;
    if table.is_empty() {
        return Err(ReportError::EmptyInput(config.input.clone()));
    }

    let metadata = RunMetadata::from_table(&table);
    log_metadata(&metadata);

    let deployments = table.deployments();
    info!("Loaded {} rows; Deployments found: {:?}", table.len(), deployments);
    if !deployments.iter().any(|d| d == BASELINE_DEPLOYMENT) {
        warn!(
            "Baseline deployment '{}' not found in the data. Comparisons might be affected.",
            BASELINE_DEPLOYMENT
        );
    }

    let mut outcome = ReportOutcome::default();

    for metric in Metric::ALL {
        if !table.has_column(metric.field()) {
            warn!("Metric {} not found in data. Skipping plot.", metric);
            outcome.skipped.push(metric);
            continue;
        }

        info!("Plotting {} ...", metric);
        match render_metric(&table, metric, &metadata, config) {
            Ok(paths) => {
                outcome.rendered.push(metric);
                outcome.written.extend(paths);
            }
            Err(e) => {
                error!("Failed to plot {}: {}", metric, e);
                outcome.failed.push(metric);
            }
        }
    }

    Ok(outcome)
}

/// Aggregate, compare and export one metric.
fn render_metric(
    table: &RecordTable,
    metric: Metric,
    metadata: &RunMetadata,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    let pivot = aggregate(table, metric)?;
    if config.verbose {
        debug!("\n>>> Pivot table for {}:\n{}", metric, pivot);
    }

    let comparisons = compare_table(&pivot);
    let report = ChartReport::build(&pivot, &comparisons, metadata);

    render::export(&report, metadata.model(), &config.export, &config.output_dir)
}

fn log_metadata(metadata: &RunMetadata) {
    if metadata.is_empty() {
        return;
    }
    info!("--- Benchmark Run Metadata ---");
    for (key, value) in metadata.entries() {
        info!("  {}: {}", capitalize(key), value);
    }
    info!("------------------------------");
}
