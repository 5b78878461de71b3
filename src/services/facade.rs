//! Two-method facade for boundary layers.
//!
//! Binds exactly one import strategy, one export strategy, one importer and
//! one exporter at construction, and adds no logic of its own. A
//! multi-format deployment would route through
//! [`crate::formats::FormatRegistry`] before choosing which pairing to
//! invoke; that composition stays with the caller.

use crate::Result;
use crate::formats::{CsvExportFormat, CsvImportFormat};
use crate::models::{ExportResult, ImportResult, ProcessorOptions};
use crate::repository::Repository;
use crate::services::{Exporter, Importer};
use std::sync::Arc;

/// CSV import/export surface consumed by boundary layers.
pub struct CsvTransfer {
    importer: Importer,
    exporter: Exporter,
    import_format: CsvImportFormat,
    export_format: CsvExportFormat,
}

impl CsvTransfer {
    /// Creates a CSV transfer facade over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            importer: Importer::new(repository.clone()),
            exporter: Exporter::new(repository),
            import_format: CsvImportFormat::new(),
            export_format: CsvExportFormat::new(),
        }
    }

    /// Replaces the bound CSV import strategy (e.g. to configure
    /// always-literal fields).
    #[must_use]
    pub fn with_import_format(mut self, format: CsvImportFormat) -> Self {
        self.import_format = format;
        self
    }

    /// Imports a CSV payload into the collection named in `options`.
    pub fn import_csv(&self, input: &[u8], options: &ProcessorOptions) -> ImportResult {
        self.importer.import(input, &self.import_format, options)
    }

    /// Exports the collection named in `options` as CSV.
    ///
    /// # Errors
    ///
    /// Propagates repository and serialization failures.
    pub fn export_csv(&self, options: &ProcessorOptions) -> Result<ExportResult> {
        self.exporter.export(&self.export_format, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    #[test]
    fn test_facade_delegates_import_and_export() {
        let repository = Arc::new(InMemoryRepository::new());
        let transfer = CsvTransfer::new(repository);
        let options = ProcessorOptions::new("articles");

        let report = transfer.import_csv(b"title,slug\nA,a\nB,b", &options);
        assert_eq!(report.created, 2);

        let export = transfer.export_csv(&options).unwrap();
        assert_eq!(export.mime_type, "text/csv");
        assert!(export.payload.contains("A"));
        assert!(export.payload.contains("B"));
    }

    #[test]
    fn test_facade_honors_literal_fields() {
        let repository = Arc::new(InMemoryRepository::new());
        let transfer = CsvTransfer::new(repository.clone())
            .with_import_format(CsvImportFormat::new().with_literal_fields(["zip"]));
        let options = ProcessorOptions::new("addresses");

        transfer.import_csv(b"zip\n01234", &options);

        let stored = repository
            .find_first("addresses", &crate::repository::FindParams::new())
            .unwrap()
            .unwrap();
        assert_eq!(stored.field("zip"), Some(&serde_json::json!("01234")));
    }
}
