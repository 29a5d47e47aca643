use thiserror::Error;

/// Reasons a scoring run is rejected. Every variant aborts the whole run;
/// no partial results are produced.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("the dataset has no rows")]
    EmptyDataset,

    #[error("three numeric feature columns are required, found {found}")]
    InsufficientFeatures { found: usize },

    #[error("column '{0}' does not exist in the dataset")]
    MissingColumn(String),

    #[error("column '{column}' row {row}: '{value}' is not a number")]
    NonNumericFeatureValue {
        column: String,
        row: usize,
        value: String,
    },
}
