//! Operator checklist of descriptions and the inclusion filter

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::*;

/// Descriptions the operator chose to keep
pub type SelectionSet = BTreeSet<String>;

/// A distinct description and how many rows carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionCount {
    pub description: String,
    pub occurrences: usize,
}

impl DescriptionCount {
    /// Checklist label, e.g. `1- TARIFA BANCARIA (2 vezes)`
    pub fn checklist_label(&self, position: usize) -> String {
        let unit = if self.occurrences == 1 { "vez" } else { "vezes" };
        format!(
            "{}- {} ({} {})",
            position, self.description, self.occurrences, unit
        )
    }
}

fn count_descriptions(view: &View) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in view.rows() {
        *counts.entry(row.description.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Distinct descriptions in lexicographic order with their row counts
pub fn distinct_descriptions(view: &View) -> Vec<DescriptionCount> {
    count_descriptions(view)
        .into_iter()
        .map(|(description, occurrences)| DescriptionCount {
            description: description.to_string(),
            occurrences,
        })
        .collect()
}

/// Distinct descriptions, most frequent first
pub fn occurrence_ranking(view: &View) -> Vec<DescriptionCount> {
    let mut ranking = distinct_descriptions(view);
    ranking.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    ranking
}

/// Keep only the rows whose description was selected
///
/// An empty selection keeps nothing.
pub fn apply(view: &View, selected: &SelectionSet) -> View {
    if selected.is_empty() {
        tracing::warn!(kind = ?view.kind(), "no description selected, inclusion keeps nothing");
        return View::empty(view.kind());
    }

    let included = view.filtered(|row| selected.contains(&row.description));
    tracing::info!(
        kind = ?view.kind(),
        selected = selected.len(),
        kept = included.len(),
        of = view.len(),
        "inclusion applied"
    );
    included
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(descriptions: &[&str]) -> View {
        View::new(
            ViewKind::Debit,
            descriptions
                .iter()
                .map(|d| ViewRow {
                    date: None,
                    description: d.to_string(),
                    document_no: String::new(),
                    amount: "-1,00".to_string(),
                })
                .collect(),
        )
    }

    fn selection(items: &[&str]) -> SelectionSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_distinct_descriptions_sorted_with_counts() {
        let v = view(&["TARIFA B", "TARIFA A", "TARIFA B", "ENCARGOS"]);
        let distinct = distinct_descriptions(&v);
        let pairs: Vec<(&str, usize)> = distinct
            .iter()
            .map(|d| (d.description.as_str(), d.occurrences))
            .collect();
        assert_eq!(pairs, vec![("ENCARGOS", 1), ("TARIFA A", 1), ("TARIFA B", 2)]);
    }

    #[test]
    fn test_occurrence_ranking() {
        let v = view(&["B", "A", "B", "C", "C", "C"]);
        let ranking: Vec<String> = occurrence_ranking(&v)
            .into_iter()
            .map(|d| d.description)
            .collect();
        assert_eq!(ranking, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_checklist_label() {
        let one = DescriptionCount {
            description: "TARIFA".to_string(),
            occurrences: 1,
        };
        let many = DescriptionCount {
            description: "ENCARGOS".to_string(),
            occurrences: 3,
        };
        assert_eq!(one.checklist_label(1), "1- TARIFA (1 vez)");
        assert_eq!(many.checklist_label(2), "2- ENCARGOS (3 vezes)");
    }

    #[test]
    fn test_apply_keeps_selected_rows() {
        let v = view(&["TARIFA", "SAQUE", "TARIFA", "ENCARGOS"]);
        let kept = apply(&v, &selection(&["TARIFA", "ENCARGOS"]));
        assert_eq!(kept.len(), 3);
        assert!(kept.rows().iter().all(|r| r.description != "SAQUE"));
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let v = view(&["TARIFA", "SAQUE"]);
        let kept = apply(&v, &SelectionSet::new());
        assert!(kept.is_empty());
        assert_eq!(kept.kind(), ViewKind::Debit);
    }

    #[test]
    fn test_unknown_selection_keeps_nothing() {
        let v = view(&["TARIFA"]);
        assert!(apply(&v, &selection(&["OUTRA"])).is_empty());
    }
}
