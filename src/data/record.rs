//! Benchmark records as loaded from JSONL, plus the table that holds them.
//!
//! A record keeps every field of its JSON object; typed accessors cover the
//! fields the report reads (deployment, workload size, request rate, metrics).

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::analysis::metric::Metric;

/// One benchmark run result: a single JSON object from the input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Raw field lookup; JSON `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Deployment identifier. Non-string values use their JSON text.
    pub fn deployment(&self) -> Option<String> {
        self.get("deployment").map(value_text)
    }

    /// Workload size. Accepts integers and integral floats.
    pub fn num_prompts(&self) -> Option<i64> {
        let v = self.get("num_prompts")?;
        if let Some(n) = v.as_i64() {
            return Some(n);
        }
        v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
    }

    /// Request rate normalised to a grouping key.
    ///
    /// Strings such as `"inf"` pass through, numbers are formatted from their
    /// `f64` value so `10` and `10.0` share a key, and a missing rate becomes
    /// `"nan"`.
    pub fn rate_key(&self) -> String {
        match self.get("request_rate") {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) => f.to_string(),
                None => n.to_string(),
            },
            Some(v) => value_text(v),
            None => "nan".to_string(),
        }
    }

    /// Numeric value of `metric`, if present and numeric.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.get(metric.field()).and_then(Value::as_f64)
    }
}

/// Text form of a JSON value: strings unquoted, everything else as JSON.
pub(crate) fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// All records of one input file, in file order.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: Vec<Record>,
    columns: BTreeSet<String>,
}

impl RecordTable {
    pub fn new(records: Vec<Record>) -> Self {
        let columns = records
            .iter()
            .flat_map(|r| r.field_names().map(str::to_string))
            .collect();
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// True if at least one record carries `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Distinct deployment names, sorted.
    pub fn deployments(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(Record::deployment)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
