//! The four serving metrics a report is produced for.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MeanTtftMs,
    MeanTpotMs,
    MeanItlMs,
    RequestThroughput,
}

impl Metric {
    /// Report order.
    pub const ALL: [Metric; 4] = [
        Metric::MeanTtftMs,
        Metric::MeanTpotMs,
        Metric::MeanItlMs,
        Metric::RequestThroughput,
    ];

    /// JSON field name in the benchmark records.
    pub fn field(self) -> &'static str {
        match self {
            Metric::MeanTtftMs => "mean_ttft_ms",
            Metric::MeanTpotMs => "mean_tpot_ms",
            Metric::MeanItlMs => "mean_itl_ms",
            Metric::RequestThroughput => "request_throughput",
        }
    }

    /// Axis/title label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::MeanTtftMs => "Mean Time To First Token (ms)",
            Metric::MeanTpotMs => "Mean Time Per Output Token (ms)",
            Metric::MeanItlMs => "Mean Inter-Token Latency (ms)",
            Metric::RequestThroughput => "Request Throughput (req/s)",
        }
    }

    /// Throughput is maximised, latencies are minimised.
    pub fn is_higher_better(self) -> bool {
        matches!(self, Metric::RequestThroughput)
    }

    /// Header of the table column naming the winning deployment.
    pub fn best_column(self) -> &'static str {
        if self.is_higher_better() {
            "Highest Throughput by"
        } else {
            "Fastest Deployment"
        }
    }

    /// Header of the table column holding the improvement percentage.
    pub fn improvement_column(self) -> &'static str {
        if self.is_higher_better() {
            "Higher by (%)"
        } else {
            "Faster by (%)"
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}
