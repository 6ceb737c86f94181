//! JSONL loader: one benchmark record per non-blank line.
//!
//! Lines that fail to parse are skipped with a warning so a single truncated
//! write does not sink the whole report.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, warn};

use crate::data::{
    metadata::METADATA_FIELDS,
    record::{Record, RecordTable},
};
use crate::error::{ReportError, Result};

/// Reads `path` into a [`RecordTable`].
///
/// An empty result is returned as-is; the caller decides how to report it.
/// Fails if the file cannot be read, or if records were loaded but none of
/// them has a `deployment` field.
pub fn load_records(path: &Path) -> Result<RecordTable> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.map_err(|e| ReportError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Record>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("Line {}: JSON parse error, skipping ({})", lineno, e);
            }
        }
    }

    debug!(
        "Parsed {} records from {} ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );

    let table = RecordTable::new(records);
    if table.is_empty() {
        return Ok(table);
    }

    if !table.has_column("deployment") {
        return Err(ReportError::MissingDeploymentField);
    }

    for field in METADATA_FIELDS {
        if !table.has_column(field) {
            warn!(
                "Metadata field '{}' not found in data. It will be omitted from the chart display.",
                field
            );
        }
    }

    Ok(table)
}
