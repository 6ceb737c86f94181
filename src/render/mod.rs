//! Chart construction and export.
//!
//! One [`ChartReport`] per metric: grouped bars (one series per deployment,
//! one group per workload slice) plus the comparison table. It is written as
//! PNG (plotters), HTML (plotly) and/or CSV, or shown interactively when no
//! chart file is requested.

pub mod html;
pub mod png;
pub mod table;

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use log::info;

use crate::analysis::{aggregate::PivotTable, compare::Comparison, metric::Metric};
use crate::config::ExportOptions;
use crate::data::metadata::RunMetadata;
use crate::error::{ReportError, Result};

pub use table::ComparisonTable;

/// Bar colours, cycled across deployments in column order.
pub const BAR_COLORS: [&str; 6] = ["#f8c518", "#F17322", "#D44539", "#2ca02c", "#9467bd", "#1f77b4"];

pub const X_AXIS_TITLE: &str = "Request Rate (requests/sec) | Prompts";

/// Bars of one deployment across all workload slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    /// `None` leaves a gap.
    pub values: Vec<Option<f64>>,
}

/// Everything needed to draw one metric's chart and table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartReport {
    pub metric: Metric,
    /// `"<model> - <metric label>"`.
    pub title: String,
    /// GPU / gateway line, may be empty.
    pub subtitle: String,
    /// One x-axis category per pivot row.
    pub categories: Vec<String>,
    /// Hover line per category naming the workload slice.
    pub hover_text: Vec<String>,
    pub series: Vec<Series>,
    pub table: ComparisonTable,
}

impl ChartReport {
    pub fn build(pivot: &PivotTable, comparisons: &[Comparison], metadata: &RunMetadata) -> Self {
        let series = pivot
            .deployments
            .iter()
            .enumerate()
            .map(|(col, name)| Series {
                name: name.clone(),
                color: BAR_COLORS[col % BAR_COLORS.len()],
                values: pivot.column(col),
            })
            .collect();

        Self {
            metric: pivot.metric,
            title: format!("{} - {}", metadata.model(), pivot.metric.label()),
            subtitle: metadata.subtitle(),
            categories: pivot.rows.iter().map(|r| r.label()).collect(),
            hover_text: pivot
                .rows
                .iter()
                .map(|r| format!("Prompts: {}<br>Rate: {}", r.num_prompts, r.rate))
                .collect(),
            series,
            table: ComparisonTable::build(pivot, comparisons),
        }
    }

    /// Top of the value axis: tallest bar plus headroom, at least 1.
    pub fn y_max(&self) -> f64 {
        let max = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if max > 0.0 { max * 1.1 } else { 1.0 }
    }
}

/// `summary_<metric>_<model>.<ext>`, with path separators in the model name
/// replaced so the file lands where intended.
pub fn output_file_name(metric: Metric, model: &str, ext: &str) -> String {
    let model: String = model
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("summary_{}_{}.{}", metric.field(), model, ext)
}

/// Writes every requested export for one chart and returns the written paths.
/// Without a chart export the table is printed and the figure opened in the
/// browser; failing to open it is an error for this chart only.
pub fn export(
    report: &ChartReport,
    model: &str,
    options: &ExportOptions,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if options.writes_files() {
        create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))?;
    }

    if options.png {
        let path = output_dir.join(output_file_name(report.metric, model, "png"));
        png::write_png(report, &path)?;
        info!("Exported {}", path.display());
        written.push(path);
    }

    if options.html {
        let path = output_dir.join(output_file_name(report.metric, model, "html"));
        html::write_html(report, &path)?;
        info!("Exported {}", path.display());
        written.push(path);
    }

    if options.csv {
        let path = output_dir.join(output_file_name(report.metric, model, "csv"));
        report.table.write_csv(&path)?;
        info!("Exported {}", path.display());
        written.push(path);
    }

    if !options.writes_chart() {
        report.table.print();
        let preview = html::show(report, &output_file_name(report.metric, model, "html"))?;
        info!("Opened {}", preview.display());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate::PivotRow, compare::compare_table};

    fn sample_pivot() -> PivotTable {
        PivotTable {
            metric: Metric::MeanTtftMs,
            deployments: (0..8).map(|i| if i == 0 { "no-features".to_string() } else { format!("d{i}") }).collect(),
            rows: vec![PivotRow {
                num_prompts: 200,
                rate: "4".into(),
                values: (0..8).map(|i| Some(10.0 + i as f64)).collect(),
            }],
        }
    }

    #[test]
    fn file_name_replaces_path_separators() {
        assert_eq!(
            output_file_name(Metric::MeanTtftMs, "meta-llama/Llama-3.1-8B", "png"),
            "summary_mean_ttft_ms_meta-llama_Llama-3.1-8B.png"
        );
        assert_eq!(
            output_file_name(Metric::RequestThroughput, r"org\model", "html"),
            "summary_request_throughput_org_model.html"
        );
    }

    #[test]
    fn colors_cycle_past_palette() {
        let pivot = sample_pivot();
        let report = ChartReport::build(&pivot, &compare_table(&pivot), &RunMetadata::default());
        assert_eq!(report.series.len(), 8);
        assert_eq!(report.series[0].color, BAR_COLORS[0]);
        assert_eq!(report.series[6].color, BAR_COLORS[0]);
        assert_eq!(report.series[7].color, BAR_COLORS[1]);
        assert_eq!(report.categories, vec!["4 | 200"]);
        assert_eq!(report.hover_text, vec!["Prompts: 200<br>Rate: 4"]);
        assert_eq!(report.title, "N/A - Mean Time To First Token (ms)");
    }

    #[test]
    fn y_max_has_headroom() {
        let pivot = sample_pivot();
        let report = ChartReport::build(&pivot, &compare_table(&pivot), &RunMetadata::default());
        assert!((report.y_max() - 17.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn html_and_csv_exports_create_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let pivot = sample_pivot();
        let report = ChartReport::build(&pivot, &compare_table(&pivot), &RunMetadata::default());
        let opts = ExportOptions { html: true, csv: true, ..Default::default() };
        let written = export(&report, "org/model", &opts, &out).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
        assert!(written[1].ends_with("summary_mean_ttft_ms_org_model.csv"));
    }

    #[test]
    fn png_export_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        let pivot = sample_pivot();
        let report = ChartReport::build(&pivot, &compare_table(&pivot), &RunMetadata::default());
        let opts = ExportOptions { png: true, ..Default::default() };
        let written = export(&report, "m", &opts, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("summary_mean_ttft_ms_m.png")]);
        assert!(std::fs::metadata(&written[0]).unwrap().len() > 0);
    }
}
