//! JSON-file-backed repository backend.
//!
//! Persists the collection map as a single JSON document, reloaded on open
//! and rewritten after every successful write. Suited to the CLI and small
//! data sets; reads are served from the in-memory substrate.

use crate::models::{Document, Record};
use crate::repository::memory::{CollectionMap, InMemoryRepository};
use crate::repository::{FindParams, Repository};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Document repository persisted to a JSON file.
pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
}

impl JsonFileRepository {
    /// Opens a repository at the given path, loading existing data.
    ///
    /// A missing file starts an empty repository; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let collections = if path.exists() {
            load(&path)?
        } else {
            CollectionMap::new()
        };
        Ok(Self {
            path,
            inner: InMemoryRepository::from_collections(collections),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let snapshot = self.inner.snapshot()?;
        let payload = serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Store {
            operation: "persist".to_string(),
            cause: e.to_string(),
        })?;
        std::fs::write(&self.path, payload).map_err(|e| Error::Store {
            operation: "persist".to_string(),
            cause: e.to_string(),
        })
    }
}

fn load(path: &Path) -> Result<CollectionMap> {
    let payload = std::fs::read_to_string(path).map_err(|e| Error::Store {
        operation: "load".to_string(),
        cause: e.to_string(),
    })?;
    if payload.trim().is_empty() {
        return Ok(CollectionMap::new());
    }
    serde_json::from_str(&payload).map_err(|e| Error::Store {
        operation: "load".to_string(),
        cause: e.to_string(),
    })
}

impl Repository for JsonFileRepository {
    fn find_many(&self, collection: &str, params: &FindParams) -> Result<Vec<Document>> {
        self.inner.find_many(collection, params)
    }

    fn create(&self, collection: &str, data: Record, locale: Option<&str>) -> Result<Document> {
        let document = self.inner.create(collection, data, locale)?;
        self.persist()?;
        Ok(document)
    }

    fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Record,
        locale: Option<&str>,
    ) -> Result<Document> {
        let document = self.inner.update(collection, document_id, data, locale)?;
        self.persist()?;
        Ok(document)
    }
}
