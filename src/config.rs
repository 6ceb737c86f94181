//! Run configuration: which input to read, where and how to export.

use std::path::PathBuf;

/// Export targets for every metric's chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub png: bool,
    pub html: bool,
    /// Comparison table only, no chart.
    pub csv: bool,
}

impl ExportOptions {
    /// True when a chart file is written; otherwise the chart is shown interactively.
    pub fn writes_chart(&self) -> bool {
        self.png || self.html
    }

    /// True when anything lands in the output directory.
    pub fn writes_files(&self) -> bool {
        self.writes_chart() || self.csv
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// JSONL benchmark results.
    pub input: PathBuf,
    /// Directory receiving exported files.
    pub output_dir: PathBuf,
    pub export: ExportOptions,
    /// Log pivot tables at debug level.
    pub verbose: bool,
}

impl ReportConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from("."),
            export: ExportOptions::default(),
            verbose: false,
        }
    }
}
