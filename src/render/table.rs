//! Comparison table shown under each chart: per-deployment values, the best
//! deployment and its improvement over the baseline.

use std::path::Path;

use crate::analysis::{compare::Comparison, aggregate::PivotTable};
use crate::error::Result;

/// Text cells ready for any output (terminal, HTML, PNG, CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ComparisonTable {
    /// Columns: `Rate`, `Prompts`, one per deployment, best deployment, improvement.
    /// `comparisons` is aligned with `pivot.rows`.
    pub fn build(pivot: &PivotTable, comparisons: &[Comparison]) -> Self {
        let metric = pivot.metric;

        let mut headers = vec!["Rate".to_string(), "Prompts".to_string()];
        headers.extend(pivot.deployments.iter().cloned());
        headers.push(metric.best_column().to_string());
        headers.push(metric.improvement_column().to_string());

        let rows = pivot
            .rows
            .iter()
            .zip(comparisons)
            .map(|(row, cmp)| {
                let mut cells = vec![row.rate.clone(), row.num_prompts.to_string()];
                cells.extend(row.values.iter().map(|v| match v {
                    Some(v) => format!("{:.2}", v),
                    None => "N/A".to_string(),
                }));
                cells.push(cmp.best_label().to_string());
                cells.push(cmp.improvement.to_string());
                cells
            })
            .collect();

        Self { headers, rows }
    }

    /// Widest cell per column, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(c, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(c))
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Plain-text rendering with aligned columns.
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = line(&self.headers[..]);
        out.push('\n');
        out.push_str(&"=".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(&row[..]));
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        println!("{}", self.to_text());
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| crate::error::ReportError::io(path, e))?;
        Ok(())
    }
}
