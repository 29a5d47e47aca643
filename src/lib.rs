//! Heuristic exoplanet transit scoring.
//!
//! [`data`] turns CSV / JSON / Parquet files into a [`data::model::Table`];
//! [`scoring`] detects the relevant columns and produces per-row
//! planet probabilities plus an aggregate verdict.

pub mod data;
pub mod scoring;
