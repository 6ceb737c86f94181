//! # vLLM deployment comparison reports
//!
//! Reads JSONL benchmark results (one record per deployment and workload),
//! averages each metric per (num_prompts, request_rate, deployment), picks the
//! best deployment of every workload slice and measures it against the
//! `no-features` baseline.
//!
//! ## Pipeline
//! - **data:** JSONL loading (malformed lines skipped) and run metadata.
//! - **analysis:** polars group-by/mean pivot, baseline comparison.
//! - **render:** grouped-bar chart + comparison table as PNG (plotters),
//!   HTML (plotly) or CSV; interactive display when no chart file is requested.
//! - **report:** drives the stages once per metric with per-metric isolation.
//!
//! ## Metrics
//! `mean_ttft_ms`, `mean_tpot_ms`, `mean_itl_ms` (lower is better) and
//! `request_throughput` (higher is better).

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod report;

pub use config::{ExportOptions, ReportConfig};
pub use error::{ReportError, Result};
pub use report::{run, ReportOutcome};
