//! Per-operation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for one import or export operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorOptions {
    /// Target collection identifier (required).
    pub collection: String,

    /// Optional locale filter/tag.
    #[serde(default)]
    pub locale: Option<String>,

    /// Field used to detect existing documents for upsert.
    ///
    /// Absent means every record is a create.
    #[serde(default)]
    pub id_field: Option<String>,

    /// Export-only field denylist.
    #[serde(default)]
    pub exclude_fields: Vec<String>,
}

impl ProcessorOptions {
    /// Creates options targeting the given collection.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            locale: None,
            id_field: None,
            exclude_fields: Vec::new(),
        }
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the upsert key field.
    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = Some(id_field.into());
        self
    }

    /// Sets the export field denylist.
    #[must_use]
    pub fn with_exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}
