//! Scoring pipeline: column detection → standardization → weights →
//! sigmoid scores → labels.
//!
//! ```text
//!   Table ──► detect ──► ColumnSelection (+ ColumnOverrides)
//!                              │
//!                              ▼
//!                  numeric series per feature
//!                              │
//!                              ▼
//!                  standardize ──► estimate_weights
//!                              │
//!                              ▼
//!                        score ──► label ──► ScoringReport
//! ```
//!
//! Every run recomputes everything from the table; nothing is cached.

pub mod detect;
pub mod error;
pub mod filter;
pub mod label;
pub mod model;
pub mod report;
pub mod standardize;
pub mod weights;

use crate::data::model::Table;

pub use detect::{ColumnOverrides, ColumnSelection, FEATURE_COUNT};
pub use error::ScoringError;
pub use label::{Aggregate, Label, RowResult};
pub use report::ScoringReport;
pub use weights::{WeightSource, WeightVector};

/// Detect columns, apply `overrides` and score the table.
pub fn run(table: &Table, overrides: &ColumnOverrides) -> Result<ScoringReport, ScoringError> {
    if table.is_empty() {
        return Err(ScoringError::EmptyDataset);
    }
    let mut selection = detect::detect(table);
    selection.apply(overrides);
    score_selection(table, &selection)
}

/// Score the table with an explicit column selection.
pub fn score_selection(
    table: &Table,
    selection: &ColumnSelection,
) -> Result<ScoringReport, ScoringError> {
    if table.is_empty() {
        return Err(ScoringError::EmptyDataset);
    }

    let names = feature_names(selection)?;

    let mut z: [Vec<f64>; FEATURE_COUNT] = Default::default();
    for (slot, name) in z.iter_mut().zip(names) {
        *slot = standardize::standardize(&numeric_series(table, name)?);
    }

    let target = selection.target.as_deref();
    let (weights, weight_source) = weights::estimate_weights(&z, names, table, target);
    let probabilities = model::score(&z, &weights);
    let (rows, aggregate) = label::label(&probabilities);

    log::info!(
        "scored {} rows with {:?} weights {:?}: {:?} at {:.3}",
        rows.len(),
        weight_source,
        weights.weights,
        aggregate.label,
        aggregate.confidence
    );

    Ok(ScoringReport {
        selection: selection.clone(),
        weights,
        weight_source,
        rows,
        aggregate,
    })
}

fn feature_names(selection: &ColumnSelection) -> Result<[&str; FEATURE_COUNT], ScoringError> {
    let chosen = selection.chosen_features();
    let found = chosen.len();
    chosen
        .try_into()
        .map_err(|_| ScoringError::InsufficientFeatures { found })
}

/// Coerce one column to numbers; the first bad cell fails the whole series.
pub fn numeric_series(table: &Table, column: &str) -> Result<Vec<f64>, ScoringError> {
    if !table.has_column(column) {
        return Err(ScoringError::MissingColumn(column.to_string()));
    }
    table
        .column(column)
        .enumerate()
        .map(|(row, cell)| {
            cell.and_then(|v| v.coerce_number())
                .ok_or_else(|| ScoringError::NonNumericFeatureValue {
                    column: column.to_string(),
                    row,
                    value: cell.map_or_else(|| "<missing>".to_string(), |v| v.to_string()),
                })
        })
        .collect()
}
