//! In-memory table locator for testing and development

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// Table locator serving pre-registered grids per document path
#[derive(Debug, Clone, Default)]
pub struct MemoryLocator {
    documents: Arc<RwLock<HashMap<PathBuf, Vec<RawGrid>>>>,
    failures: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryLocator {
    /// Create an empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the grids returned for `document`
    pub fn insert(&self, document: impl Into<PathBuf>, grids: Vec<RawGrid>) {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert(document.into(), grids);
        }
    }

    /// Make extraction of `document` fail with `message`
    pub fn fail_on(&self, document: impl Into<PathBuf>, message: impl Into<String>) {
        if let Ok(mut failures) = self.failures.write() {
            failures.insert(document.into(), message.into());
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        if let Ok(mut documents) = self.documents.write() {
            documents.clear();
        }
        if let Ok(mut failures) = self.failures.write() {
            failures.clear();
        }
    }

    fn grids(&self, document: &Path) -> Result<Vec<RawGrid>, ExtractionError> {
        if let Some(message) = self
            .failures
            .read()
            .map_err(|e| ExtractionError::Locator(e.to_string()))?
            .get(document)
        {
            return Err(ExtractionError::Locator(message.clone()));
        }

        self.documents
            .read()
            .map_err(|e| ExtractionError::Locator(e.to_string()))?
            .get(document)
            .cloned()
            .ok_or_else(|| {
                ExtractionError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("document not found: {}", document.display()),
                ))
            })
    }
}

impl TableLocator for MemoryLocator {
    fn page_count(&self, document: &Path) -> Result<usize, ExtractionError> {
        let grids = self.grids(document)?;
        Ok(grids.iter().map(|g| g.page + 1).max().unwrap_or(0))
    }

    fn locate(
        &self,
        document: &Path,
        request: &LocateRequest,
    ) -> Result<Vec<RawGrid>, ExtractionError> {
        let grids = self.grids(document)?;
        if let Some(grid) = grids.iter().find(|g| g.page >= request.page_columns.len()) {
            return Err(ExtractionError::Glyph {
                page: grid.page,
                message: "no column boundaries supplied for page".to_string(),
            });
        }
        Ok(grids)
    }
}
