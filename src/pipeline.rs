//! Session object sequencing the pipeline stages for one statement

use std::path::Path;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::glossary::{self, Glossary};
use crate::ledger::{self, Reconstruction, ReconstructionStats, TableReconstructor};
use crate::report::{self, DescriptionCount, SelectionSet};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{threshold_from_slider, validate_threshold};

/// Derived views of one side of the ledger
#[derive(Debug, Clone)]
struct SideState {
    view: View,
    matched: Option<(u8, View)>,
    included: Option<View>,
    report: Option<ReportTable>,
}

impl SideState {
    fn new(view: View) -> Self {
        Self {
            view,
            matched: None,
            included: None,
            report: None,
        }
    }
}

/// Loaded statement: the ledger and both classified sides
#[derive(Debug, Clone)]
struct Statement {
    ledger: Ledger,
    stats: ReconstructionStats,
    debit: SideState,
    credit: SideState,
}

/// Pipeline holding the latest output of every stage
///
/// Each stage is computed by a pure function of the previous stage's output
/// and the operator's choice. Running a stage again replaces its output and
/// discards everything derived from it.
pub struct StatementPipeline<L: TableLocator> {
    locator: L,
    config: PipelineConfig,
    glossary: Glossary,
    reconstructor: TableReconstructor,
    run_id: Uuid,
    statement: Option<Statement>,
}

impl<L: TableLocator> StatementPipeline<L> {
    /// Create a pipeline, loading the glossary named by `config` if any
    pub fn new(locator: L, config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let glossary = match &config.glossary_path {
            Some(path) => Glossary::load(path),
            None => Glossary::default(),
        };
        Ok(Self {
            locator,
            reconstructor: TableReconstructor::new(&config),
            config,
            glossary,
            run_id: Uuid::new_v4(),
            statement: None,
        })
    }

    /// Replace the fee glossary
    pub fn with_glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = glossary;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Identifier of the current statement run, used in logs
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    // Reconstruction
    /// Extract and reconstruct a statement document, replacing any previous one
    pub fn load_document(&mut self, document: &Path) -> PipelineResult<&Ledger> {
        self.statement = None;
        self.run_id = Uuid::new_v4();
        let span = tracing::info_span!("statement", run_id = %self.run_id);
        let _guard = span.enter();

        let pages = self.locator.page_count(document)?;
        let request = self.config.locate_request(pages);
        tracing::info!(document = %document.display(), pages, "extracting statement tables");

        let reconstruction =
            self.reconstructor
                .reconstruct_document(&self.locator, document, &request)?;
        Ok(self.install(reconstruction))
    }

    /// Reconstruct a statement from grids that were already located
    pub fn load_grids(&mut self, grids: &[RawGrid]) -> &Ledger {
        self.run_id = Uuid::new_v4();
        let span = tracing::info_span!("statement", run_id = %self.run_id);
        let _guard = span.enter();

        let reconstruction = self.reconstructor.reconstruct(grids);
        self.install(reconstruction)
    }

    fn install(&mut self, reconstruction: Reconstruction) -> &Ledger {
        let Reconstruction { ledger, stats } = reconstruction;
        let debit = SideState::new(ledger::to_debit_view(&ledger));
        let credit = SideState::new(ledger::to_credit_view(&ledger));
        let statement = self.statement.insert(Statement {
            ledger,
            stats,
            debit,
            credit,
        });
        &statement.ledger
    }

    fn statement(&self) -> PipelineResult<&Statement> {
        self.statement
            .as_ref()
            .ok_or(PipelineError::StageNotReady("no statement loaded"))
    }

    fn side(&self, kind: ViewKind) -> PipelineResult<&SideState> {
        let statement = self.statement()?;
        Ok(match kind {
            ViewKind::Debit => &statement.debit,
            ViewKind::Credit => &statement.credit,
        })
    }

    fn side_mut(&mut self, kind: ViewKind) -> PipelineResult<&mut SideState> {
        let statement = self
            .statement
            .as_mut()
            .ok_or(PipelineError::StageNotReady("no statement loaded"))?;
        Ok(match kind {
            ViewKind::Debit => &mut statement.debit,
            ViewKind::Credit => &mut statement.credit,
        })
    }

    /// The reconstructed ledger
    pub fn ledger(&self) -> PipelineResult<&Ledger> {
        Ok(&self.statement()?.ledger)
    }

    /// Counters of the last reconstruction
    pub fn stats(&self) -> PipelineResult<ReconstructionStats> {
        Ok(self.statement()?.stats)
    }

    /// Debit or credit view of the ledger
    pub fn view(&self, kind: ViewKind) -> PipelineResult<&View> {
        Ok(&self.side(kind)?.view)
    }

    // Glossary matching
    /// Filter a side against the glossary with a 0.50..=1.00 slider position
    pub fn match_glossary(&mut self, kind: ViewKind, slider: f64) -> PipelineResult<&View> {
        let threshold = threshold_from_slider(slider)?;
        self.match_glossary_threshold(kind, threshold)
    }

    /// Filter a side against the glossary with a 50..=100 threshold
    pub fn match_glossary_threshold(
        &mut self,
        kind: ViewKind,
        threshold: u8,
    ) -> PipelineResult<&View> {
        validate_threshold(threshold)?;
        let matched = glossary::filter_view(&self.side(kind)?.view, &self.glossary, threshold);

        let side = self.side_mut(kind)?;
        side.included = None;
        side.report = None;
        let (_, view) = side.matched.insert((threshold, matched));
        Ok(view)
    }

    /// Glossary-filtered view of a side
    pub fn matched(&self, kind: ViewKind) -> PipelineResult<&View> {
        self.side(kind)?
            .matched
            .as_ref()
            .map(|(_, view)| view)
            .ok_or(PipelineError::StageNotReady("glossary filter has not run"))
    }

    /// Threshold used by the last glossary filter of a side
    pub fn threshold(&self, kind: ViewKind) -> PipelineResult<u8> {
        self.side(kind)?
            .matched
            .as_ref()
            .map(|(threshold, _)| *threshold)
            .ok_or(PipelineError::StageNotReady("glossary filter has not run"))
    }

    // Inclusion
    /// Checklist of distinct descriptions in the glossary-filtered view
    pub fn checklist(&self, kind: ViewKind) -> PipelineResult<Vec<DescriptionCount>> {
        Ok(report::distinct_descriptions(self.matched(kind)?))
    }

    /// Keep the selected descriptions of the glossary-filtered view
    pub fn include(&mut self, kind: ViewKind, selection: &SelectionSet) -> PipelineResult<&View> {
        let included = report::apply(self.matched(kind)?, selection);

        let side = self.side_mut(kind)?;
        side.report = None;
        Ok(side.included.insert(included))
    }

    /// View kept by the last inclusion
    pub fn included(&self, kind: ViewKind) -> PipelineResult<&View> {
        self.side(kind)?
            .included
            .as_ref()
            .ok_or(PipelineError::StageNotReady("no inclusion confirmed"))
    }

    // Summary
    /// Build the final report table of the included rows
    pub fn summarize(&mut self, kind: ViewKind) -> PipelineResult<&ReportTable> {
        let table = report::summarize(self.included(kind)?);
        let side = self.side_mut(kind)?;
        Ok(side.report.insert(table))
    }

    /// Final report table built by the last summary
    pub fn report(&self, kind: ViewKind) -> PipelineResult<&ReportTable> {
        self.side(kind)?
            .report
            .as_ref()
            .ok_or(PipelineError::StageNotReady("report has not been summarized"))
    }

    /// Hand the final report table to a renderer
    pub fn render<R: ReportRenderer + ?Sized>(
        &self,
        kind: ViewKind,
        renderer: &R,
        title: &str,
    ) -> PipelineResult<Vec<u8>> {
        renderer.render(self.report(kind)?, title)
    }
}
