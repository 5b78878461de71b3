//! Format strategies for import/export.
//!
//! Each format implements [`ImportFormat`] and/or [`ExportFormat`]; the
//! [`FormatRegistry`] resolves a strategy from a MIME type or file extension
//! token so new formats plug in without touching the orchestration layer.

pub mod csv;
pub mod json;
pub mod registry;
pub mod traits;

pub use csv::{CsvExportFormat, CsvImportFormat};
pub use json::{JsonExportFormat, JsonImportFormat};
pub use registry::FormatRegistry;
pub use traits::{ExportFormat, ImportFormat};
