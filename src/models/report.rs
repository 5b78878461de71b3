//! Import and export operation results.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Synthetic row index reported for a whole-input parse failure.
pub const PARSE_FAILURE_ROW: i64 = -1;

/// A row-scoped import failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportError {
    /// 0-indexed position within the parsed record sequence, or
    /// [`PARSE_FAILURE_ROW`] when the whole input was malformed.
    pub row: i64,

    /// The field involved, when the failure is attributable to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Human-readable cause.
    pub message: String,
}

impl ImportError {
    /// Creates an error for the given row.
    #[must_use]
    pub fn new(row: i64, message: impl Into<String>) -> Self {
        Self {
            row,
            field: None,
            message: message.into(),
        }
    }

    /// Attaches the field the failure is attributable to.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Aggregate result of an import operation.
///
/// Counters satisfy `created + updated + skipped + failed == parsed records`,
/// with one exception: a whole-input parse failure reports `failed == 1`, all
/// other counters zero, and a single error entry with `row == -1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    /// Records that produced a new document.
    pub created: usize,
    /// Records that updated an existing document.
    pub updated: usize,
    /// Records skipped by strategy-level business rules.
    ///
    /// The base reconciliation algorithm never produces skips; the counter
    /// exists for format strategies that filter rows.
    pub skipped: usize,
    /// Records that failed, plus 1 for a whole-input parse failure.
    pub failed: usize,
    /// Row-ordered failure detail.
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the result for a whole-input parse failure.
    #[must_use]
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self {
            failed: 1,
            errors: vec![ImportError::new(PARSE_FAILURE_ROW, message)],
            ..Self::default()
        }
    }

    /// Records an isolated per-record failure.
    pub fn record_failure(&mut self, row: usize, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(ImportError::new(row_index(row), message));
    }

    /// Total records accounted for.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }

    /// Returns whether every record succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Converts a 0-based record position to its reported row index.
#[allow(clippy::cast_possible_wrap)]
const fn row_index(row: usize) -> i64 {
    row as i64
}

/// Result of an export operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// Serialized payload.
    pub payload: String,
    /// MIME type of the payload.
    pub mime_type: String,
    /// Suggested download filename.
    pub file_name: String,
}

/// Derives the suggested filename for an export.
///
/// Embeds the collection identifier with every non-alphanumeric character
/// replaced by `_`, and an RFC 3339 UTC timestamp with `:` and `.` replaced
/// by `-` so the name is filesystem-safe.
#[must_use]
pub fn export_file_name(collection: &str, extension: &str) -> String {
    let sanitized: String = collection
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let timestamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{sanitized}_{timestamp}.{extension}")
}
