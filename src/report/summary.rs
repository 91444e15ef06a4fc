//! Totals and chronological ordering of the final report

use bigdecimal::BigDecimal;

use crate::parse::{amount, date};
use crate::types::*;

/// Sum of the absolute amounts of a view
pub fn total(view: &View) -> BigDecimal {
    view.rows()
        .iter()
        .map(|row| amount::parse(&row.amount).abs())
        .sum()
}

/// Build the final report table of a view
///
/// Dated rows come first in ascending date order, then undated rows in their
/// view order, then the total and doubled total rows.
pub fn summarize(view: &View) -> ReportTable {
    let total = total(view);
    let double = &total * BigDecimal::from(2);

    let mut dated: Vec<(date::DateKey, ReportRow)> = view
        .rows()
        .iter()
        .map(|row| {
            let key = date::sort_key_opt(row.date.as_deref());
            let report_row = ReportRow {
                kind: RowKind::Transaction,
                date: row.date.as_deref().map(date::canonicalize).unwrap_or_default(),
                description: row.description.clone(),
                document_no: row.document_no.clone(),
                amount: amount::normalize(&row.amount),
            };
            (key, report_row)
        })
        .collect();
    dated.sort_by_key(|(key, _)| *key);

    let mut rows: Vec<ReportRow> = dated.into_iter().map(|(_, row)| row).collect();
    rows.push(synthesized(RowKind::Total, TOTAL_LABEL, &total));
    rows.push(synthesized(RowKind::DoubleTotal, DOUBLE_TOTAL_LABEL, &double));

    for row in rows.iter_mut().filter(|row| row.kind.is_synthesized()) {
        row.date.clear();
    }

    tracing::info!(
        kind = ?view.kind(),
        rows = view.len(),
        total = %amount::format(&total),
        "report summarized"
    );

    ReportTable {
        kind: view.kind(),
        rows,
        total,
    }
}

fn synthesized(kind: RowKind, label: &str, value: &BigDecimal) -> ReportRow {
    ReportRow {
        kind,
        date: String::new(),
        description: label.to_string(),
        document_no: String::new(),
        amount: amount::format(value),
    }
}
