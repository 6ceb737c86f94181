//! Descriptive run metadata (model, GPU, gateway) used to label charts.

use crate::data::record::{value_text, RecordTable};

/// Fields read from the first record for display.
pub const METADATA_FIELDS: [&str; 3] = ["model", "gpu", "gateway"];

/// Placeholder for a field the data does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metadata of one benchmark run, taken from the first record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetadata {
    entries: Vec<(&'static str, String)>,
}

impl RunMetadata {
    /// Empty table gives empty metadata; otherwise every field in
    /// [`METADATA_FIELDS`] is present, possibly as `"N/A"`.
    pub fn from_table(table: &RecordTable) -> Self {
        let Some(first) = table.first() else {
            return Self::default();
        };

        let entries = METADATA_FIELDS
            .iter()
            .map(|&field| {
                let value = first
                    .get(field)
                    .map(value_text)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                (field, value)
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn model(&self) -> &str {
        self.get("model").unwrap_or(NOT_AVAILABLE)
    }

    /// `"Gpu: H100 | Gateway: envoy"`; fields missing from the mapping are left out.
    pub fn subtitle(&self) -> String {
        ["gpu", "gateway"]
            .iter()
            .filter_map(|&key| self.get(key).map(|v| format!("{}: {}", capitalize(key), v)))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Upper-cases the first character: `"gpu"` becomes `"Gpu"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
