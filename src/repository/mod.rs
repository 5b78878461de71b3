//! Document repository contract and backends.
//!
//! The [`Repository`] trait is the sole abstraction boundary between the
//! orchestration layer and the concrete document store: it knows nothing of
//! CSV, HTTP, or any UI. Backends must provide stable ordering across
//! repeated `find_many` calls with increasing pages so exhaustive pagination
//! sees no duplicate or missing entries over an unmutated backing set.

pub mod file;
pub mod memory;

pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;

use crate::Result;
use crate::models::{Document, Record};
use serde_json::Value;

/// Page request for `find_many`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Maximum documents per page.
    pub page_size: usize,
}

impl Pagination {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }
}

/// Query parameters for repository reads.
///
/// Filters are `$eq`-style equality predicates; all must match. A locale
/// restricts matches to documents carrying that tag.
#[derive(Debug, Clone, Default)]
pub struct FindParams {
    /// Equality predicates: field name to required value.
    pub filters: Record,
    /// Locale restriction.
    pub locale: Option<String>,
    /// Page request; absent means all matches.
    pub pagination: Option<Pagination>,
}

impl FindParams {
    /// Creates empty parameters (match everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.insert(field.into(), value);
        self
    }

    /// Restricts matches to a locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the page request.
    #[must_use]
    pub const fn with_pagination(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Some(Pagination::new(page, page_size));
        self
    }
}

/// Contract every document store backend implements.
///
/// Writes shed caller-supplied reserved fields (identifier, lifecycle
/// timestamps); the repository owns those. `update` merges the payload onto
/// the existing document, preserving fields the payload does not name.
pub trait Repository: Send + Sync {
    /// Returns at most one page of documents matching all predicates.
    fn find_many(&self, collection: &str, params: &FindParams) -> Result<Vec<Document>>;

    /// Returns the first match, if any.
    ///
    /// Used by the importer only to test existence for upsert.
    fn find_first(&self, collection: &str, params: &FindParams) -> Result<Option<Document>> {
        let page = params.clone().with_pagination(1, 1);
        Ok(self.find_many(collection, &page)?.into_iter().next())
    }

    /// Creates a document with a fresh identifier and creation timestamp.
    fn create(&self, collection: &str, data: Record, locale: Option<&str>) -> Result<Document>;

    /// Merges `data` onto the document with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the identifier does not exist
    /// in the collection.
    fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Record,
        locale: Option<&str>,
    ) -> Result<Document>;
}

/// Returns whether a document satisfies the given parameters.
///
/// Shared predicate evaluation for backends that filter in process.
#[must_use]
pub fn matches(document: &Document, params: &FindParams) -> bool {
    if let Some(ref locale) = params.locale {
        if document.locale.as_deref() != Some(locale.as_str()) {
            return false;
        }
    }
    params
        .filters
        .iter()
        .all(|(field, expected)| document.value_of(field).as_ref() == Some(expected))
}

/// Applies a page request to an ordered match list.
#[must_use]
pub fn paginate(documents: Vec<Document>, pagination: Option<Pagination>) -> Vec<Document> {
    match pagination {
        Some(page) if page.page_size > 0 => {
            let start = page.page.saturating_sub(1).saturating_mul(page.page_size);
            documents
                .into_iter()
                .skip(start)
                .take(page.page_size)
                .collect()
        }
        _ => documents,
    }
}
