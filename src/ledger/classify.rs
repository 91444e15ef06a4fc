//! Debit and credit projections of a ledger

use crate::types::*;

/// Rows with a debit amount, without the credit and balance columns
pub fn to_debit_view(ledger: &Ledger) -> View {
    project(ledger, ViewKind::Debit)
}

/// Rows with a credit amount, without the debit and balance columns
pub fn to_credit_view(ledger: &Ledger) -> View {
    project(ledger, ViewKind::Credit)
}

/// Project `ledger` onto one side, keeping ledger order
pub fn project(ledger: &Ledger, kind: ViewKind) -> View {
    let rows: Vec<ViewRow> = ledger
        .iter()
        .filter_map(|row| {
            row.amount(kind).map(|amount| ViewRow {
                date: row.date.clone(),
                description: row.description.clone(),
                document_no: row.document_no.clone(),
                amount: amount.to_string(),
            })
        })
        .collect();

    tracing::debug!(?kind, rows = rows.len(), of = ledger.len(), "ledger classified");
    View::new(kind, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, description: &str, credit: Option<&str>, debit: Option<&str>) -> TransactionRow {
        TransactionRow {
            date: Some(date.to_string()),
            description: description.to_string(),
            document_no: "1".to_string(),
            credit: credit.map(str::to_string),
            debit: debit.map(str::to_string),
            balance: Some("100,00".to_string()),
        }
    }

    fn sample() -> Ledger {
        Ledger::from_rows(vec![
            row("02/01/23", "TARIFA", None, Some("-10,00")),
            row("01/01/23", "PIX RECEBIDO", Some("50,00"), None),
            row("03/01/23", "SAQUE", None, Some("-20,00")),
        ])
    }

    #[test]
    fn test_debit_view() {
        let view = to_debit_view(&sample());
        assert_eq!(view.kind(), ViewKind::Debit);
        assert_eq!(view.columns(), ["Data", "Histórico", "Docto.", "Débito (R$)"]);
        let descriptions: Vec<&str> = view.rows().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["TARIFA", "SAQUE"]);
        assert_eq!(view.rows()[0].amount, "-10,00");
    }

    #[test]
    fn test_credit_view() {
        let view = to_credit_view(&sample());
        assert_eq!(view.columns()[3], "Crédito (R$)");
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].amount, "50,00");
        assert_eq!(view.rows()[0].date.as_deref(), Some("01/01/23"));
    }

    #[test]
    fn test_empty_ledger() {
        assert!(to_debit_view(&Ledger::default()).is_empty());
        assert!(to_credit_view(&Ledger::default()).is_empty());
    }
}
