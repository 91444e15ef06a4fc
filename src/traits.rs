//! Traits at the boundaries with external collaborators

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::*;

/// One table fragment found by the table locator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawGrid {
    /// Page or region the grid was found on
    pub page: usize,
    /// Rows of raw cell text, possibly ragged
    pub rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Create a grid from rows of string-like cells
    pub fn new<S: Into<String>>(page: usize, rows: Vec<Vec<S>>) -> Self {
        Self {
            page,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// True when any cell equals `text` exactly
    pub fn contains_cell(&self, text: &str) -> bool {
        self.rows.iter().flatten().any(|cell| cell == text)
    }
}

/// Parameters handed to the table locator for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateRequest {
    /// Column x-boundaries, one set per page
    pub page_columns: Vec<Vec<u32>>,
    /// Vertical tolerance used to merge text into one row
    pub row_tolerance: u32,
}

impl LocateRequest {
    /// Use the same column boundaries on every one of `pages` pages
    pub fn uniform(pages: usize, columns: &[u32], row_tolerance: u32) -> Self {
        Self {
            page_columns: vec![columns.to_vec(); pages],
            row_tolerance,
        }
    }

    /// Column boundaries as the comma separated list locators usually expect
    pub fn column_spec(&self, page: usize) -> Option<String> {
        self.page_columns.get(page).map(|cols| {
            cols.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

/// Table locator turning a statement document into raw grids
///
/// The call is blocking. Any failure aborts reconstruction of the whole
/// document; implementations must not return partial output.
pub trait TableLocator {
    /// Number of pages in the document
    fn page_count(&self, document: &Path) -> Result<usize, ExtractionError>;

    /// Locate all tables on all pages, in page order
    fn locate(
        &self,
        document: &Path,
        request: &LocateRequest,
    ) -> Result<Vec<RawGrid>, ExtractionError>;
}

/// Renderer laying out a final report table
pub trait ReportRenderer {
    /// Render `table` under `title` into bytes
    fn render(&self, table: &ReportTable, title: &str) -> PipelineResult<Vec<u8>>;
}
