//! Plain-data renderers for the final report

use csv::WriterBuilder;
use serde::Serialize;

use crate::traits::ReportRenderer;
use crate::types::*;

/// CSV output: one header line with the column labels, then one line per row
///
/// The title is not written. Fields are separated by `;` by default because
/// amounts use `,` as decimal separator.
#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
    pub delimiter: u8,
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl ReportRenderer for CsvRenderer {
    fn render(&self, table: &ReportTable, _title: &str) -> PipelineResult<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(table.columns())
            .map_err(|e| PipelineError::Render(e.to_string()))?;
        for row in &table.rows {
            writer
                .write_record(row.cells())
                .map_err(|e| PipelineError::Render(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| PipelineError::Render(e.to_string()))
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    columns: [&'static str; 4],
    rows: &'a [ReportRow],
    total: String,
    double_total: String,
}

/// Pretty-printed JSON with title, columns, typed rows and totals
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, table: &ReportTable, title: &str) -> PipelineResult<Vec<u8>> {
        let report = JsonReport {
            title,
            columns: table.columns(),
            rows: &table.rows,
            total: crate::parse::amount::format(&table.total),
            double_total: crate::parse::amount::format(&table.double_total()),
        };
        serde_json::to_vec_pretty(&report).map_err(|e| PipelineError::Render(e.to_string()))
    }
}
