//! Pivot of raw records into one averaged value per (workload slice, deployment).
//!
//! Repeated trials of the same configuration are averaged with a polars
//! group-by; the result is reshaped so each row is one (num_prompts, rate)
//! slice and each column one deployment, baseline first.

use std::{collections::HashMap, fmt};

use log::debug;
use polars::prelude::*;

use crate::analysis::metric::Metric;
use crate::data::record::RecordTable;
use crate::error::Result;

/// Reference deployment every other deployment is measured against.
pub const BASELINE_DEPLOYMENT: &str = "no-features";

/// One workload slice across all deployments.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub num_prompts: i64,
    /// Normalised request rate, e.g. `"10"`, `"2.5"`, `"inf"`.
    pub rate: String,
    /// Averaged metric per deployment, aligned with [`PivotTable::deployments`].
    /// `None` means no data for that combination.
    pub values: Vec<Option<f64>>,
}

impl PivotRow {
    /// Category label used on the chart's x axis.
    pub fn label(&self) -> String {
        format!("{} | {}", self.rate, self.num_prompts)
    }
}

/// Deployment-indexed table of averaged values for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub metric: Metric,
    /// Column order: baseline first, then the rest alphabetically.
    pub deployments: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Averaged value for one deployment in one row.
    pub fn value(&self, row: usize, deployment: &str) -> Option<f64> {
        let col = self.deployments.iter().position(|d| d == deployment)?;
        self.rows.get(row)?.values.get(col).copied().flatten()
    }

    /// Column of values for one deployment, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| r.values.get(col).copied().flatten())
            .collect()
    }

    /// Largest value in the table, if any cell has data.
    pub fn max_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(|r| r.values.iter().flatten().copied())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

impl fmt::Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {:<10}", "num_prompts", "rate")?;
        for d in &self.deployments {
            write!(f, " {:>16}", d)?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:<12} {:<10}", row.num_prompts, row.rate)?;
            for v in &row.values {
                match v {
                    Some(v) => write!(f, " {:>16.3}", v)?,
                    None => write!(f, " {:>16}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Numeric sort key of a normalised rate. Anything that does not parse to a
/// real number (including NaN) sorts as +∞.
pub fn rate_sort_key(rate: &str) -> f64 {
    match rate.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => f64::INFINITY,
    }
}

/// Averaged value for one (num_prompts, rate, deployment) key.
struct Group {
    num_prompts: i64,
    rate: String,
    deployment: String,
    mean: Option<f64>,
}

/// Groups `table` by (num_prompts, rate, deployment), averages `metric`, and
/// pivots the result. Records lacking a deployment or a workload size are
/// left out; records lacking the metric only contribute "no data".
pub fn aggregate(table: &RecordTable, metric: Metric) -> Result<PivotTable> {
    let mut groups = group_means(table, metric)?;

    groups.sort_by(|a, b| {
        rate_sort_key(&a.rate)
            .total_cmp(&rate_sort_key(&b.rate))
            .then(a.num_prompts.cmp(&b.num_prompts))
            .then_with(|| a.rate.cmp(&b.rate))
    });

    let mut deployments: Vec<String> = groups
        .iter()
        .map(|g| g.deployment.clone())
        .filter(|d| d != BASELINE_DEPLOYMENT)
        .collect();
    deployments.sort();
    deployments.dedup();
    deployments.insert(0, BASELINE_DEPLOYMENT.to_string());

    let column: HashMap<&str, usize> = deployments
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    let mut rows: Vec<PivotRow> = Vec::new();
    let mut row_index: HashMap<(i64, String), usize> = HashMap::new();

    for g in &groups {
        let idx = *row_index
            .entry((g.num_prompts, g.rate.clone()))
            .or_insert_with(|| {
                rows.push(PivotRow {
                    num_prompts: g.num_prompts,
                    rate: g.rate.clone(),
                    values: vec![None; deployments.len()],
                });
                rows.len() - 1
            });
        rows[idx].values[column[g.deployment.as_str()]] = g.mean;
    }

    debug!(
        "{}: {} groups pivoted into {} rows x {} deployments",
        metric,
        groups.len(),
        rows.len(),
        deployments.len()
    );

    Ok(PivotTable {
        metric,
        deployments,
        rows,
    })
}

/// Mean of `metric` per (num_prompts, rate, deployment), in no particular order.
fn group_means(table: &RecordTable, metric: Metric) -> Result<Vec<Group>> {
    let mut prompts: Vec<i64> = Vec::new();
    let mut rates: Vec<String> = Vec::new();
    let mut deployments: Vec<String> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();

    for record in table.records() {
        let (Some(deployment), Some(n)) = (record.deployment(), record.num_prompts()) else {
            continue;
        };
        prompts.push(n);
        rates.push(record.rate_key());
        deployments.push(deployment);
        values.push(record.metric(metric));
    }

    if prompts.is_empty() {
        return Ok(Vec::new());
    }

    let df = df!(
        "num_prompts" => &prompts,
        "rate_str" => &rates,
        "deployment" => &deployments,
        "value" => &values,
    )?;

    let grouped = df
        .lazy()
        .group_by([col("num_prompts"), col("rate_str"), col("deployment")])
        .agg([col("value").mean()])
        .collect()?;

    let n_col = grouped.column("num_prompts")?.i64()?;
    let r_col = grouped.column("rate_str")?.str()?;
    let d_col = grouped.column("deployment")?.str()?;
    let v_col = grouped.column("value")?.f64()?;

    let mut out = Vec::with_capacity(grouped.height());
    for i in 0..grouped.height() {
        let (Some(num_prompts), Some(rate), Some(deployment)) =
            (n_col.get(i), r_col.get(i), d_col.get(i))
        else {
            continue;
        };
        out.push(Group {
            num_prompts,
            rate: rate.to_string(),
            deployment: deployment.to_string(),
            mean: v_col.get(i).filter(|v| !v.is_nan()),
        });
    }
    Ok(out)
}
