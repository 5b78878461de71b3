//! Import service: the per-record reconciliation loop.
//!
//! Parses raw input through a format strategy, then reconciles each record
//! independently against the repository: sanitize, decide create-or-update,
//! write. One failing row never aborts the batch; failures are recorded with
//! their row index and processing continues.

use crate::Result;
use crate::formats::ImportFormat;
use crate::models::{ImportResult, ProcessorOptions, RESERVED_FIELDS, Record};
use crate::repository::{FindParams, Repository};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the reconciliation of one record did.
enum Outcome {
    Created,
    Updated,
}

/// Service importing parsed records into a document collection.
pub struct Importer {
    repository: Arc<dyn Repository>,
}

impl Importer {
    /// Creates an importer over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Imports raw input, returning the per-row reconciliation result.
    ///
    /// A whole-input parse failure short-circuits: the result carries a
    /// single synthetic error with row `-1` and `failed == 1`, and no
    /// record-level processing happens. All other failures are per-record
    /// and isolated.
    pub fn import(
        &self,
        input: &[u8],
        format: &dyn ImportFormat,
        options: &ProcessorOptions,
    ) -> ImportResult {
        let records = match format.parse(input) {
            Ok(records) => records,
            Err(e) => {
                warn!(collection = %options.collection, error = %e, "input parse failed");
                return ImportResult::parse_failure(e.to_string());
            }
        };
        debug!(
            collection = %options.collection,
            records = records.len(),
            "input parsed"
        );

        let mut result = ImportResult::new();
        for (row, record) in records.into_iter().enumerate() {
            match self.reconcile(record, options) {
                Ok(Outcome::Created) => result.created += 1,
                Ok(Outcome::Updated) => result.updated += 1,
                Err(e) => {
                    warn!(collection = %options.collection, row, error = %e, "record failed");
                    result.record_failure(row, e.to_string());
                }
            }
        }

        info!(
            collection = %options.collection,
            created = result.created,
            updated = result.updated,
            skipped = result.skipped,
            failed = result.failed,
            "import finished"
        );
        result
    }

    /// Reconciles a single record: sanitize, decide, write.
    fn reconcile(&self, record: Record, options: &ProcessorOptions) -> Result<Outcome> {
        let payload = sanitize(record);
        let locale = options.locale.as_deref();

        let Some(id_field) = options.id_field.as_deref() else {
            self.repository
                .create(&options.collection, payload, locale)?;
            return Ok(Outcome::Created);
        };

        let Some(key) = upsert_key(&payload, id_field) else {
            self.repository
                .create(&options.collection, payload, locale)?;
            return Ok(Outcome::Created);
        };

        let mut params = FindParams::new().with_filter(id_field, key);
        if let Some(locale) = locale {
            params = params.with_locale(locale);
        }

        match self.repository.find_first(&options.collection, &params)? {
            Some(existing) => {
                self.repository.update(
                    &options.collection,
                    &existing.document_id,
                    payload,
                    locale,
                )?;
                Ok(Outcome::Updated)
            }
            None => {
                self.repository
                    .create(&options.collection, payload, locale)?;
                Ok(Outcome::Created)
            }
        }
    }
}

/// Drops store-reserved fields from a parsed record.
fn sanitize(mut record: Record) -> Record {
    for field in RESERVED_FIELDS {
        record.remove(*field);
    }
    record
}

/// Returns the record's upsert key value, if usable.
///
/// Missing, null, and empty-string values all mean "no key": the record is
/// created rather than matched against existing documents.
fn upsert_key(record: &Record, id_field: &str) -> Option<Value> {
    match record.get(id_field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value.clone()),
    }
}
