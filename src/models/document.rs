//! Persisted document representation.

use crate::models::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store-reserved field names that client payloads must never supply.
///
/// The identifier and the lifecycle timestamps are owned by the repository;
/// import sanitization strips them from every record before a write, and
/// repository backends shed them from create payloads as a second line.
pub const RESERVED_FIELDS: &[&str] = &["id", "documentId", "createdAt", "updatedAt", "publishedAt"];

/// A persisted record: client fields plus repository-owned metadata.
///
/// The core never mutates a `Document` in place; every write produces a new
/// logical version through the repository's create/update operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Repository-assigned immutable identifier.
    pub document_id: String,

    /// Optional locale tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Creation timestamp, assigned by the repository.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last-update timestamp, assigned by the repository.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Publication timestamp, if the collection distinguishes drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Client-owned fields.
    pub fields: Record,
}

impl Document {
    /// Returns a client field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Resolves a field name to a value, covering reserved names as well.
    ///
    /// Used by repository backends to evaluate equality filters uniformly
    /// over metadata and client fields.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<Value> {
        match name {
            "documentId" | "id" => Some(Value::String(self.document_id.clone())),
            "locale" => self.locale.as_ref().map(|l| Value::String(l.clone())),
            "createdAt" => self.created_at.map(timestamp_value),
            "updatedAt" => self.updated_at.map(timestamp_value),
            "publishedAt" => self.published_at.map(timestamp_value),
            _ => self.fields.get(name).cloned(),
        }
    }

    /// Flattens the document into a single record for serialization.
    ///
    /// Field order is deterministic: `documentId`, then client fields in
    /// their stored order, then lifecycle timestamps, then `locale` when
    /// present. Absent timestamps flatten to `null` so formats can render
    /// them as empty fields.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "documentId".to_string(),
            Value::String(self.document_id.clone()),
        );
        for (name, value) in &self.fields {
            record.insert(name.clone(), value.clone());
        }
        record.insert(
            "createdAt".to_string(),
            self.created_at.map_or(Value::Null, timestamp_value),
        );
        record.insert(
            "updatedAt".to_string(),
            self.updated_at.map_or(Value::Null, timestamp_value),
        );
        record.insert(
            "publishedAt".to_string(),
            self.published_at.map_or(Value::Null, timestamp_value),
        );
        if let Some(ref locale) = self.locale {
            record.insert("locale".to_string(), Value::String(locale.clone()));
        }
        record
    }
}

/// Renders a timestamp as its RFC 3339 value.
fn timestamp_value(ts: DateTime<Utc>) -> Value {
    Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
