//! # Tabsync
//!
//! Bulk synchronization between delimited text files and document collections.
//!
//! Tabsync parses an uploaded delimited-text payload into typed records and
//! reconciles them against a document collection (create-or-update, optionally
//! keyed by a caller-chosen field), and conversely drains a full collection
//! page by page and serializes it back to text.
//!
//! ## Architecture
//!
//! - Format adapters ([`formats::ImportFormat`], [`formats::ExportFormat`])
//!   convert between raw bytes and ordered record sequences.
//! - The [`repository::Repository`] trait abstracts the backing document
//!   store; orchestration never sees a concrete store.
//! - [`services::Importer`] runs the per-record reconciliation loop with
//!   row-level failure isolation; [`services::Exporter`] drives exhaustive
//!   cursor pagination.
//! - [`services::CsvTransfer`] binds one importer, one exporter, and one
//!   CSV strategy pair behind a two-method surface for boundary layers.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tabsync::{CsvTransfer, InMemoryRepository, ProcessorOptions};
//!
//! let repository = Arc::new(InMemoryRepository::new());
//! let transfer = CsvTransfer::new(repository);
//!
//! let options = ProcessorOptions::new("articles");
//! let report = transfer.import_csv(b"title,slug\nHello,hello", &options);
//! assert_eq!(report.created, 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod formats;
pub mod models;
pub mod repository;
pub mod services;

// Re-exports for convenience
pub use formats::{
    CsvExportFormat, CsvImportFormat, ExportFormat, FormatRegistry, ImportFormat,
    JsonExportFormat, JsonImportFormat,
};
pub use models::{
    Document, ExportResult, ImportError, ImportResult, ProcessorOptions, RESERVED_FIELDS, Record,
};
pub use repository::{FindParams, InMemoryRepository, JsonFileRepository, Pagination, Repository};
pub use services::{CsvTransfer, Exporter, Importer};

/// Error type for tabsync operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Parse` | The whole input payload violates the format's lexical grammar |
/// | `InvalidInput` | Missing required parameters, malformed option values |
/// | `NotFound` | `update` targets a document identifier the store does not hold |
/// | `Store` | Backend I/O fails (lock poisoning, file persistence, paging) |
/// | `UnknownFormat` | A MIME type or extension token matches no registered format |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The input payload could not be parsed at all.
    ///
    /// Fatal to the whole import call; surfaced as a single synthetic
    /// row `-1` entry in the import result, never per record.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A document identifier was not found in the target collection.
    ///
    /// Raised by `update`. During import this indicates a lookup/write race
    /// and is absorbed as a per-record error rather than aborting the batch.
    #[error("document '{document_id}' not found in collection '{collection}'")]
    NotFound {
        /// The collection that was addressed.
        collection: String,
        /// The identifier that did not resolve.
        document_id: String,
    },

    /// A store operation failed.
    #[error("store operation '{operation}' failed: {cause}")]
    Store {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An export payload could not be serialized.
    #[error("format error: {0}")]
    Format(String),

    /// No registered format matched the given token.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// Result type alias for tabsync operations.
pub type Result<T> = std::result::Result<T, Error>;
