//! Data model for records, documents, options, and operation results.

pub mod document;
pub mod options;
pub mod record;
pub mod report;

pub use document::{Document, RESERVED_FIELDS};
pub use options::ProcessorOptions;
pub use record::{Record, infer_scalar};
pub use report::{ExportResult, ImportError, ImportResult, PARSE_FAILURE_ROW, export_file_name};
