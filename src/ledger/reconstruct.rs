//! Reconstruction of one ledger from the raw grids of a statement

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::parse::date::to_two_digit_year;
use crate::traits::*;
use crate::types::*;

/// A grid row keyed by canonical column
///
/// Only the columns actually present in the source row have an entry, so a
/// ragged grid degrades to rows with missing columns instead of shifted ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SparseRow {
    cells: BTreeMap<Column, String>,
}

impl SparseRow {
    /// Zip the cells of `row` with the canonical columns
    pub fn coerce(row: &[String]) -> Self {
        Self {
            cells: Column::CANONICAL
                .iter()
                .copied()
                .zip(row.iter().cloned())
                .collect(),
        }
    }

    /// Cell text, `None` when the column is absent or blank
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells
            .get(&column)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    /// True when the source row had this column at all
    pub fn has(&self, column: Column) -> bool {
        self.cells.contains_key(&column)
    }

    fn owned(&self, column: Column) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

/// Counters describing one reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconstructionStats {
    /// Grids received from the locator
    pub grids_seen: usize,
    /// Grids dropped because they contained a noise marker
    pub grids_discarded: usize,
    /// Grids in which a header row was found and stripped
    pub headers_stripped: usize,
    /// Rows appended before merging
    pub rows_read: usize,
    /// Continuation rows folded into the following row
    pub rows_merged: usize,
    /// Trailing continuation rows with no row to merge into
    pub rows_dropped: usize,
}

/// Ledger together with the counters of its reconstruction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconstruction {
    pub ledger: Ledger,
    pub stats: ReconstructionStats,
}

/// Turns noisy table-locator output into a single ordered ledger
#[derive(Debug, Clone)]
pub struct TableReconstructor {
    noise_markers: Vec<String>,
    header_token: String,
}

impl Default for TableReconstructor {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl TableReconstructor {
    /// Create a reconstructor using the markers and header token of `config`
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            noise_markers: config.noise_markers.clone(),
            header_token: config.header_token.clone(),
        }
    }

    /// Obtain the grids of `document` and reconstruct its ledger
    ///
    /// A locator failure aborts the whole document: no partial ledger is
    /// returned.
    pub fn reconstruct_document<L: TableLocator + ?Sized>(
        &self,
        locator: &L,
        document: &Path,
        request: &LocateRequest,
    ) -> PipelineResult<Reconstruction> {
        let grids = locator.locate(document, request).map_err(|e| {
            tracing::error!(document = %document.display(), error = %e, "table extraction failed");
            PipelineError::Extraction(e)
        })?;
        Ok(self.reconstruct(&grids))
    }

    /// True when any cell of the grid is a known marketing or footer text
    pub fn is_noise(&self, grid: &RawGrid) -> bool {
        self.noise_markers
            .iter()
            .any(|marker| grid.contains_cell(marker))
    }

    /// Rows after the first header row, or all rows when there is no header
    pub fn strip_header<'a>(&self, rows: &'a [Vec<String>]) -> (&'a [Vec<String>], bool) {
        match rows
            .iter()
            .position(|row| row.iter().any(|cell| cell == &self.header_token))
        {
            Some(idx) => (&rows[idx + 1..], true),
            None => (rows, false),
        }
    }

    /// Reconstruct a ledger from grids given in page order
    pub fn reconstruct(&self, grids: &[RawGrid]) -> Reconstruction {
        let mut stats = ReconstructionStats {
            grids_seen: grids.len(),
            ..Default::default()
        };
        let mut working: Vec<SparseRow> = Vec::new();

        for grid in grids {
            if self.is_noise(grid) {
                tracing::debug!(page = grid.page, rows = grid.rows.len(), "discarding decorative grid");
                stats.grids_discarded += 1;
                continue;
            }

            let (rows, had_header) = self.strip_header(&grid.rows);
            if had_header {
                stats.headers_stripped += 1;
            }
            working.extend(rows.iter().map(|row| SparseRow::coerce(row)));
        }
        stats.rows_read = working.len();

        let rows = fill_dates(&working);
        let ledger = merge_continuations(rows, &mut stats);

        tracing::info!(
            grids = stats.grids_seen,
            discarded = stats.grids_discarded,
            merged = stats.rows_merged,
            rows = ledger.len(),
            "ledger reconstructed"
        );

        Reconstruction { ledger, stats }
    }
}

/// Forward-fill empty dates and shorten four digit years
fn fill_dates(rows: &[SparseRow]) -> Vec<TransactionRow> {
    let mut last_date: Option<String> = None;

    rows.iter()
        .map(|row| {
            if let Some(date) = row.owned(Column::Date) {
                last_date = Some(date);
            }
            TransactionRow {
                date: last_date.as_deref().map(to_two_digit_year),
                description: row.owned(Column::Description).unwrap_or_default(),
                document_no: row.owned(Column::DocumentNo).unwrap_or_default(),
                credit: row.owned(Column::Credit),
                debit: row.owned(Column::Debit),
                balance: row.owned(Column::Balance),
            }
        })
        .collect()
}

/// Fold every continuation row into the row that follows it
///
/// Fragments accumulate, so a run of continuation rows ends up prefixed, in
/// order, to the first row carrying amounts.
fn merge_continuations(rows: Vec<TransactionRow>, stats: &mut ReconstructionStats) -> Ledger {
    let mut merged = Vec::with_capacity(rows.len());
    let mut pending: Option<String> = None;
    let mut pending_rows = 0;

    for mut row in rows {
        if row.is_continuation() {
            pending = Some(join_fragment(pending, &row.description));
            pending_rows += 1;
            continue;
        }
        if let Some(prefix) = pending.take() {
            row.description = join_fragment(Some(prefix), &row.description);
            stats.rows_merged += pending_rows;
            pending_rows = 0;
        }
        merged.push(row);
    }

    if let Some(fragment) = pending {
        tracing::debug!(fragment = %fragment, rows = pending_rows, "dropping trailing continuation text");
        stats.rows_dropped += pending_rows;
    }

    Ledger::from_rows(merged)
}

fn join_fragment(prefix: Option<String>, text: &str) -> String {
    match prefix {
        Some(prefix) if prefix.is_empty() => text.to_string(),
        Some(prefix) if text.is_empty() => prefix,
        Some(prefix) => format!("{} {}", prefix, text),
        None => text.to_string(),
    }
}
