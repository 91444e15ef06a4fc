//! Core types and data structures for the statement pipeline

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Label of the synthesized row carrying the summed amount
pub const TOTAL_LABEL: &str = "Valor Total (R$)";

/// Label of the synthesized row carrying twice the summed amount
pub const DOUBLE_TOTAL_LABEL: &str = "Em dobro (R$)";

/// Canonical statement columns, in the order the table locator emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Posting date
    Date,
    /// Free-text transaction description ("Histórico")
    Description,
    /// Bank document number ("Docto.")
    DocumentNo,
    /// Money in
    Credit,
    /// Money out
    Debit,
    /// Running balance printed by the bank
    Balance,
}

impl Column {
    /// All columns in canonical grid order
    pub const CANONICAL: [Column; 6] = [
        Column::Date,
        Column::Description,
        Column::DocumentNo,
        Column::Credit,
        Column::Debit,
        Column::Balance,
    ];

    /// Header label as printed on the statement
    pub fn label(&self) -> &'static str {
        match self {
            Column::Date => "Data",
            Column::Description => "Histórico",
            Column::DocumentNo => "Docto.",
            Column::Credit => "Crédito (R$)",
            Column::Debit => "Débito (R$)",
            Column::Balance => "Saldo (R$)",
        }
    }
}

/// Side of a movement in the bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    /// Money leaving the account (fees, withdrawals, payments)
    Debit,
    /// Money entering the account
    Credit,
}

impl ViewKind {
    /// The amount column a view of this kind keeps
    pub fn amount_column(&self) -> Column {
        match self {
            ViewKind::Debit => Column::Debit,
            ViewKind::Credit => Column::Credit,
        }
    }

    /// Column labels exposed by a view of this kind
    pub fn columns(&self) -> [&'static str; 4] {
        [
            Column::Date.label(),
            Column::Description.label(),
            Column::DocumentNo.label(),
            self.amount_column().label(),
        ]
    }
}

/// A single reconstructed statement line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Canonical `DD/MM/YY` date, `None` when no date could be inherited
    pub date: Option<String>,
    /// Description, possibly merged from several physical lines
    pub description: String,
    /// Bank document number, empty when not printed
    pub document_no: String,
    /// Credit amount as printed (`1.234,56`)
    pub credit: Option<String>,
    /// Debit amount as printed (`-1.234,56`)
    pub debit: Option<String>,
    /// Balance as printed
    pub balance: Option<String>,
}

impl TransactionRow {
    /// True when the row carries only a description fragment
    pub fn is_continuation(&self) -> bool {
        self.document_no.is_empty()
            && self.credit.is_none()
            && self.debit.is_none()
            && self.balance.is_none()
    }

    /// The amount on the given side, if any
    pub fn amount(&self, kind: ViewKind) -> Option<&str> {
        match kind {
            ViewKind::Debit => self.debit.as_deref(),
            ViewKind::Credit => self.credit.as_deref(),
        }
    }
}

/// Ordered set of rows reconstructed from one statement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<TransactionRow>,
}

impl Ledger {
    /// Wrap already reconstructed rows
    pub fn from_rows(rows: Vec<TransactionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRow> {
        self.rows.iter()
    }
}

/// A row of a debit or credit view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Canonical date, `None` when unknown
    pub date: Option<String>,
    /// Description used for glossary matching and operator selection
    pub description: String,
    /// Bank document number
    pub document_no: String,
    /// Amount on the view's side, as printed
    pub amount: String,
}

/// Debit or credit projection of a ledger
///
/// Views are never mutated: every filtering stage builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    kind: ViewKind,
    rows: Vec<ViewRow>,
}

impl View {
    pub fn new(kind: ViewKind, rows: Vec<ViewRow>) -> Self {
        Self { kind, rows }
    }

    /// A view with no rows
    pub fn empty(kind: ViewKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column labels of this view
    pub fn columns(&self) -> [&'static str; 4] {
        self.kind.columns()
    }

    /// Build a new view keeping the rows accepted by `keep`
    pub fn filtered<F>(&self, mut keep: F) -> View
    where
        F: FnMut(&ViewRow) -> bool,
    {
        View::new(
            self.kind,
            self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        )
    }
}

/// What a report row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    /// A statement movement
    Transaction,
    /// Synthesized sum of the amount column
    Total,
    /// Synthesized doubled sum
    DoubleTotal,
}

impl RowKind {
    /// True for the rows added by the summary step
    pub fn is_synthesized(&self) -> bool {
        !matches!(self, RowKind::Transaction)
    }
}

/// A row of the final report table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Row kind, so renderers can highlight the synthesized rows
    pub kind: RowKind,
    /// `DD/MM/YY`, or empty for undated and synthesized rows
    pub date: String,
    /// Description or synthesized label
    pub description: String,
    /// Bank document number
    pub document_no: String,
    /// Normalized amount (`1.234,50`)
    pub amount: String,
}

impl ReportRow {
    /// Cells in column order
    pub fn cells(&self) -> [&str; 4] {
        [
            self.date.as_str(),
            self.description.as_str(),
            self.document_no.as_str(),
            self.amount.as_str(),
        ]
    }
}

/// Final table handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Side the report was built from
    pub kind: ViewKind,
    /// Chronological rows followed by the two synthesized rows
    pub rows: Vec<ReportRow>,
    /// Sum of absolute amounts
    pub total: BigDecimal,
}

impl ReportTable {
    /// Column labels of this report
    pub fn columns(&self) -> [&'static str; 4] {
        self.kind.columns()
    }

    /// Twice the total
    pub fn double_total(&self) -> BigDecimal {
        &self.total * BigDecimal::from(2)
    }

    /// Only the statement movements, without synthesized rows
    pub fn transactions(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| !row.kind.is_synthesized())
    }
}

/// Failures while obtaining raw grids from the table locator
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Glyph extraction failed on page {page}: {message}")]
    Glyph { page: usize, message: String },
    #[error("Table locator error: {0}")]
    Locator(String),
}

/// Errors that can occur in the statement pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Stage not ready: {0}")]
    StageNotReady(&'static str),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
