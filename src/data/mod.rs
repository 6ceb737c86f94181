//! Input side of the report: JSONL records and run metadata.

pub mod loader;
pub mod metadata;
pub mod record;

pub use loader::load_records;
pub use metadata::{RunMetadata, METADATA_FIELDS};
pub use record::{Record, RecordTable};
