//! Core traits for format strategies.
//!
//! Defines the [`ImportFormat`] and [`ExportFormat`] traits that format
//! adapters implement to support different file formats. Both variant
//! families are stateless converters: no strategy touches the repository.

use crate::Result;
use crate::models::{Document, ProcessorOptions, Record};

/// Parses raw input bytes into an ordered sequence of records.
///
/// Implementations are pure: the same input always yields the same record
/// sequence, and no side effects occur. A lexical-grammar violation anywhere
/// in the input fails the whole call atomically; no partial record list is
/// ever returned.
pub trait ImportFormat: Send + Sync {
    /// MIME types this format accepts, used for registry resolution.
    fn mime_types(&self) -> &'static [&'static str];

    /// File extensions (without the dot) this format accepts.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses the input into records, one per data row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] when the input violates the format's
    /// lexical grammar.
    fn parse(&self, input: &[u8]) -> Result<Vec<Record>>;
}

/// Serializes an ordered sequence of documents into a payload string.
///
/// Row order in the output equals input sequence order. Fields named in
/// `options.exclude_fields` are removed from every document before
/// serialization; the removal is purely structural.
pub trait ExportFormat: Send + Sync {
    /// MIME types this format produces, used for registry resolution.
    ///
    /// The first entry is the MIME type reported on export results.
    fn mime_types(&self) -> &'static [&'static str];

    /// File extensions (without the dot) this format produces.
    ///
    /// The first entry is used when deriving export filenames.
    fn extensions(&self) -> &'static [&'static str];

    /// Serializes the documents.
    ///
    /// An empty input sequence yields an empty payload string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Format`] when serialization fails.
    fn format(&self, documents: &[Document], options: &ProcessorOptions) -> Result<String>;
}
