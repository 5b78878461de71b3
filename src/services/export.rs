//! Export service: exhaustive cursor pagination.
//!
//! Drains the whole collection page by page, then hands the accumulated
//! documents to a format strategy. A page-fetch failure aborts the export;
//! no partial result is ever returned.

use crate::Result;
use crate::formats::ExportFormat;
use crate::models::{ExportResult, ProcessorOptions, export_file_name};
use crate::repository::{FindParams, Repository};
use std::sync::Arc;
use tracing::debug;

/// Fixed page size for export pagination. Not caller-configurable.
const PAGE_SIZE: usize = 500;

/// Service exporting a document collection through a format strategy.
pub struct Exporter {
    repository: Arc<dyn Repository>,
}

impl Exporter {
    /// Creates an exporter over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Exports the collection named in `options`.
    ///
    /// Pages are fetched sequentially starting at page 1; the last page is
    /// detected by a short page rather than a count query, which costs one
    /// extra round trip when the collection size is an exact multiple of the
    /// page size.
    ///
    /// # Errors
    ///
    /// Propagates repository failures ([`crate::Error::Store`]) and
    /// serialization failures ([`crate::Error::Format`]).
    pub fn export(
        &self,
        format: &dyn ExportFormat,
        options: &ProcessorOptions,
    ) -> Result<ExportResult> {
        let mut documents = Vec::new();
        let mut page = 1;
        loop {
            let mut params = FindParams::new().with_pagination(page, PAGE_SIZE);
            if let Some(ref locale) = options.locale {
                params = params.with_locale(locale.clone());
            }

            let batch = self.repository.find_many(&options.collection, &params)?;
            let short_page = batch.len() < PAGE_SIZE;
            documents.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }
        debug!(
            collection = %options.collection,
            documents = documents.len(),
            pages = page,
            "collection drained"
        );

        let payload = format.format(&documents, options)?;
        let mime_type = format
            .mime_types()
            .first()
            .copied()
            .unwrap_or("application/octet-stream")
            .to_string();
        let extension = format.extensions().first().copied().unwrap_or("txt");

        Ok(ExportResult {
            payload,
            mime_type,
            file_name: export_file_name(&options.collection, extension),
        })
    }
}
