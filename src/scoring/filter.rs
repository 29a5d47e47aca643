use std::collections::BTreeSet;

use super::label::{Label, RowResult};

/// Labels currently shown in the results list.
/// An empty set hides every row.
pub type LabelFilter = BTreeSet<Label>;

/// A filter with every label selected (i.e., show everything).
pub fn init_label_filter() -> LabelFilter {
    Label::ALL.into_iter().collect()
}

/// Indices of rows whose label is selected.
pub fn filtered_indices(rows: &[RowResult], filter: &LabelFilter) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| filter.contains(&r.label))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(labels: &[Label]) -> Vec<RowResult> {
        labels
            .iter()
            .enumerate()
            .map(|(index, &label)| RowResult { index, probability: 0.5, label })
            .collect()
    }

    #[test]
    fn all_selected_shows_everything() {
        let r = rows(&[Label::Planet, Label::FalsePositive, Label::Candidate]);
        assert_eq!(filtered_indices(&r, &init_label_filter()), vec![0, 1, 2]);
    }

    #[test]
    fn subset_and_empty() {
        let r = rows(&[Label::Planet, Label::FalsePositive, Label::Planet]);
        let only_planets: LabelFilter = [Label::Planet].into_iter().collect();
        assert_eq!(filtered_indices(&r, &only_planets), vec![0, 2]);
        assert!(filtered_indices(&r, &LabelFilter::new()).is_empty());
    }
}
