//! # Statement Ledger
//!
//! Reconstructs the transaction ledger of a bank-statement document and
//! narrows it, with operator input, to a report of fee entries with totals.
//!
//! ## Features
//!
//! - **Ledger reconstruction**: Noise grids dropped, headers stripped, dates forward-filled, wrapped descriptions merged
//! - **Debit/credit views**: Four-column projections of the ledger
//! - **Fee glossary matching**: Fuzzy, accent-insensitive matching at a 50 to 100 threshold
//! - **Operator inclusion**: Checklist of distinct descriptions and a selection filter
//! - **Summary**: Chronological report with total and doubled total rows
//! - **Locator abstraction**: Trait-based table extraction with an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use statement_ledger::{Glossary, PipelineConfig, RawGrid, StatementPipeline, ViewKind};
//! use statement_ledger::utils::MemoryLocator;
//! use std::collections::BTreeSet;
//!
//! let locator = MemoryLocator::new();
//! let mut pipeline = StatementPipeline::new(locator, PipelineConfig::default())
//!     .unwrap()
//!     .with_glossary(Glossary::new(["TARIFA BANCARIA"]));
//!
//! pipeline.load_grids(&[RawGrid::new(0, vec![
//!     vec!["01/01/2023", "TARIFA BANCARIA", "1", "", "-30,00", "70,00"],
//! ])]);
//! pipeline.match_glossary(ViewKind::Debit, 0.85).unwrap();
//!
//! let selection: BTreeSet<String> = ["TARIFA BANCARIA".to_string()].into();
//! pipeline.include(ViewKind::Debit, &selection).unwrap();
//! let report = pipeline.summarize(ViewKind::Debit).unwrap();
//! assert_eq!(report.rows.last().unwrap().amount, "60,00");
//! ```

pub mod config;
pub mod glossary;
pub mod ledger;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use glossary::{Glossary, GlossaryMatch};
pub use ledger::{Reconstruction, ReconstructionStats, TableReconstructor};
pub use pipeline::StatementPipeline;
pub use report::{CsvRenderer, DescriptionCount, JsonRenderer, SelectionSet};
pub use traits::*;
pub use types::*;
