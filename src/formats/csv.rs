//! CSV format strategy.
//!
//! First line is a header defining field names for all subsequent rows.
//! Blank lines are skipped, per-field whitespace is trimmed, and a UTF-8
//! byte-order mark is stripped transparently. Values are cast at parse time
//! (see [`crate::models::infer_scalar`]); fields named in the literal
//! denylist always stay strings.

use crate::formats::traits::{ExportFormat, ImportFormat};
use crate::models::{Document, ProcessorOptions, Record, infer_scalar};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;

/// CSV import strategy.
#[derive(Debug, Clone, Default)]
pub struct CsvImportFormat {
    /// Field names exempt from numeric casting.
    literal_fields: HashSet<String>,
}

impl CsvImportFormat {
    /// Creates a CSV import strategy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks fields as always-literal: their values are never cast to
    /// numbers even when they look numeric (e.g. zip codes, phone numbers).
    #[must_use]
    pub fn with_literal_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.literal_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Casts one raw field according to the literal denylist.
    fn cast(&self, field: &str, raw: &str) -> Value {
        if self.literal_fields.contains(field) {
            Value::String(raw.to_string())
        } else {
            infer_scalar(raw)
        }
    }
}

impl ImportFormat for CsvImportFormat {
    fn mime_types(&self) -> &'static [&'static str] {
        &["text/csv", "application/csv"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn parse(&self, input: &[u8]) -> Result<Vec<Record>> {
        let text = String::from_utf8_lossy(input);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::Parse(e.to_string()))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| Error::Parse(e.to_string()))?;
            if row.iter().all(str::is_empty) {
                continue;
            }

            let mut record = Record::new();
            for (i, header) in headers.iter().enumerate() {
                let raw = row.get(i).unwrap_or("");
                record.insert(header.to_string(), self.cast(header, raw));
            }
            records.push(record);
        }

        Ok(records)
    }
}

/// CSV export strategy.
///
/// Column order is the union of keys across all (already-filtered) documents
/// in first-seen order, so heterogeneous rows lose no fields. Zero documents
/// yield an empty payload with no header row.
#[derive(Debug, Clone, Default)]
pub struct CsvExportFormat;

impl CsvExportFormat {
    /// Creates a CSV export strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExportFormat for CsvExportFormat {
    fn mime_types(&self) -> &'static [&'static str] {
        &["text/csv", "application/csv"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn format(&self, documents: &[Document], options: &ProcessorOptions) -> Result<String> {
        if documents.is_empty() {
            return Ok(String::new());
        }

        let rows: Vec<Record> = documents
            .iter()
            .map(|doc| filtered_record(doc, &options.exclude_fields))
            .collect();

        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
        }

        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&columns)
            .map_err(|e| Error::Format(e.to_string()))?;

        for row in &rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| render_cell(row.get(column)))
                .collect();
            writer
                .write_record(&cells)
                .map_err(|e| Error::Format(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Format(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::Format(e.to_string()))
    }
}

/// Flattens a document and drops excluded fields.
fn filtered_record(document: &Document, exclude_fields: &[String]) -> Record {
    let mut record = document.to_record();
    for field in exclude_fields {
        record.remove(field);
    }
    record
}

/// Renders one field value as CSV cell text.
///
/// Null and absent values become empty fields; non-scalar values serialize
/// as their canonical JSON text.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
