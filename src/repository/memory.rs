//! In-memory repository backend.
//!
//! Keeps every collection as an insertion-ordered document list behind an
//! `RwLock`, which gives the stable ordering `find_many` pagination relies
//! on. Not persisted between runs; the deterministic backing store for unit
//! and integration tests, and the substrate of the file-backed backend.

use crate::models::{Document, RESERVED_FIELDS, Record};
use crate::repository::{FindParams, Repository, matches, paginate};
use crate::{Error, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Insertion-ordered collection map.
pub type CollectionMap = HashMap<String, Vec<Document>>;

/// In-memory document repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    collections: RwLock<CollectionMap>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given collections.
    #[must_use]
    pub fn from_collections(collections: CollectionMap) -> Self {
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Returns a snapshot of every collection.
    pub fn snapshot(&self) -> Result<CollectionMap> {
        Ok(self.read("snapshot")?.clone())
    }

    /// Returns the number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<usize> {
        Ok(self
            .read("count")?
            .get(collection)
            .map_or(0, Vec::len))
    }

    fn read(&self, operation: &str) -> Result<std::sync::RwLockReadGuard<'_, CollectionMap>> {
        self.collections.read().map_err(|_| Error::Store {
            operation: operation.to_string(),
            cause: "lock poisoned".to_string(),
        })
    }

    fn write(&self, operation: &str) -> Result<std::sync::RwLockWriteGuard<'_, CollectionMap>> {
        self.collections.write().map_err(|_| Error::Store {
            operation: operation.to_string(),
            cause: "lock poisoned".to_string(),
        })
    }
}

impl Repository for InMemoryRepository {
    fn find_many(&self, collection: &str, params: &FindParams) -> Result<Vec<Document>> {
        let collections = self.read("find_many")?;
        let matched: Vec<Document> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| matches(doc, params))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(paginate(matched, params.pagination))
    }

    fn create(&self, collection: &str, data: Record, locale: Option<&str>) -> Result<Document> {
        let now = Utc::now();
        let document = Document {
            document_id: Uuid::new_v4().to_string(),
            locale: locale.map(String::from),
            created_at: Some(now),
            updated_at: Some(now),
            published_at: Some(now),
            fields: shed_reserved(data),
        };

        let mut collections = self.write("create")?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Record,
        _locale: Option<&str>,
    ) -> Result<Document> {
        let mut collections = self.write("update")?;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, document_id))?;
        let document = documents
            .iter_mut()
            .find(|doc| doc.document_id == document_id)
            .ok_or_else(|| not_found(collection, document_id))?;

        for (field, value) in shed_reserved(data) {
            document.fields.insert(field, value);
        }
        document.updated_at = Some(Utc::now());
        Ok(document.clone())
    }
}

/// Drops caller-supplied reserved fields from a write payload.
fn shed_reserved(mut data: Record) -> Record {
    for field in RESERVED_FIELDS {
        data.remove(*field);
    }
    data
}

fn not_found(collection: &str, document_id: &str) -> Error {
    Error::NotFound {
        collection: collection.to_string(),
        document_id: document_id.to_string(),
    }
}
