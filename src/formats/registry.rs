//! Strategy registry.
//!
//! Resolves a format strategy from a declared MIME type or file extension.
//! Registration order determines tie-break priority: the first registered
//! strategy whose declarations contain the token wins, and later
//! registrations never silently supersede earlier matching ones.

use crate::formats::csv::{CsvExportFormat, CsvImportFormat};
use crate::formats::json::{JsonExportFormat, JsonImportFormat};
use crate::formats::traits::{ExportFormat, ImportFormat};
use std::sync::Arc;

/// Ordered collections of registered import and export strategies.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    import: Vec<Arc<dyn ImportFormat>>,
    export: Vec<Arc<dyn ExportFormat>>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in formats, CSV registered first.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_import(Arc::new(CsvImportFormat::new()));
        registry.register_import(Arc::new(JsonImportFormat::new()));
        registry.register_export(Arc::new(CsvExportFormat::new()));
        registry.register_export(Arc::new(JsonExportFormat::new()));
        registry
    }

    /// Registers an import strategy at the end of the priority order.
    pub fn register_import(&mut self, format: Arc<dyn ImportFormat>) {
        self.import.push(format);
    }

    /// Registers an export strategy at the end of the priority order.
    pub fn register_export(&mut self, format: Arc<dyn ExportFormat>) {
        self.export.push(format);
    }

    /// Resolves an import strategy by MIME type or file extension.
    #[must_use]
    pub fn resolve_import(&self, token: &str) -> Option<Arc<dyn ImportFormat>> {
        let token = normalize(token);
        self.import
            .iter()
            .find(|f| matches_token(f.mime_types(), f.extensions(), &token))
            .cloned()
    }

    /// Resolves an export strategy by MIME type or file extension.
    #[must_use]
    pub fn resolve_export(&self, token: &str) -> Option<Arc<dyn ExportFormat>> {
        let token = normalize(token);
        self.export
            .iter()
            .find(|f| matches_token(f.mime_types(), f.extensions(), &token))
            .cloned()
    }

    /// Number of registered import strategies.
    #[must_use]
    pub fn import_count(&self) -> usize {
        self.import.len()
    }

    /// Number of registered export strategies.
    #[must_use]
    pub fn export_count(&self) -> usize {
        self.export.len()
    }
}

/// Normalizes a resolution token: trim, lowercase, leading dot stripped.
fn normalize(token: &str) -> String {
    token.trim().trim_start_matches('.').to_lowercase()
}

/// Returns whether a token matches either declaration set.
fn matches_token(mime_types: &[&str], extensions: &[&str], token: &str) -> bool {
    mime_types.contains(&token) || extensions.contains(&token)
}
