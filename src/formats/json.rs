//! JSON format strategy.
//!
//! Import accepts either a top-level array of objects or newline-delimited
//! objects; export emits a pretty-printed array. JSON values arrive already
//! typed, so parse-time scalar casting does not apply.

use crate::formats::traits::{ExportFormat, ImportFormat};
use crate::models::{Document, ProcessorOptions, Record};
use crate::{Error, Result};
use serde_json::Value;

/// JSON import strategy.
#[derive(Debug, Clone, Default)]
pub struct JsonImportFormat;

impl JsonImportFormat {
    /// Creates a JSON import strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImportFormat for JsonImportFormat {
    fn mime_types(&self) -> &'static [&'static str] {
        &["application/json", "application/x-ndjson"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json", "ndjson", "jsonl"]
    }

    fn parse(&self, input: &[u8]) -> Result<Vec<Record>> {
        let text = String::from_utf8_lossy(input);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text).trim();

        if text.is_empty() {
            return Ok(Vec::new());
        }

        if text.starts_with('[') {
            let values: Vec<Value> =
                serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
            return values.into_iter().map(into_record).collect();
        }

        // Newline-delimited objects
        let mut records = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value =
                serde_json::from_str(line).map_err(|e| Error::Parse(e.to_string()))?;
            records.push(into_record(value)?);
        }
        Ok(records)
    }
}

/// Requires a parsed value to be an object row.
fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Parse(format!(
            "expected a JSON object per row, got {other}"
        ))),
    }
}

/// JSON export strategy.
#[derive(Debug, Clone, Default)]
pub struct JsonExportFormat;

impl JsonExportFormat {
    /// Creates a JSON export strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExportFormat for JsonExportFormat {
    fn mime_types(&self) -> &'static [&'static str] {
        &["application/json"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn format(&self, documents: &[Document], options: &ProcessorOptions) -> Result<String> {
        if documents.is_empty() {
            return Ok(String::new());
        }

        let rows: Vec<Value> = documents
            .iter()
            .map(|doc| {
                let mut record = doc.to_record();
                for field in &options.exclude_fields {
                    record.remove(field);
                }
                Value::Object(record)
            })
            .collect();

        serde_json::to_string_pretty(&rows).map_err(|e| Error::Format(e.to_string()))
    }
}
