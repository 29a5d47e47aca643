use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::detect::ColumnSelection;
use super::label::{Aggregate, Label, RowResult};
use super::weights::{WeightSource, WeightVector};

/// Everything one scoring run produced. Replaced wholesale by the next run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringReport {
    pub selection: ColumnSelection,
    pub weights: WeightVector,
    pub weight_source: WeightSource,
    pub rows: Vec<RowResult>,
    pub aggregate: Aggregate,
}

/// Counts shown next to the aggregate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LabelCounts {
    pub n: usize,
    pub planets: usize,
    pub candidates: usize,
    pub false_positives: usize,
}

#[derive(Serialize)]
struct ExportSummary<'a> {
    #[serde(flatten)]
    counts: LabelCounts,
    label: Option<Label>,
    confidence: f64,
    target: Option<&'a str>,
    features: Vec<&'a str>,
    weights: &'a WeightVector,
    weight_source: WeightSource,
}

#[derive(Serialize)]
struct Export<'a> {
    summary: ExportSummary<'a>,
    rows: &'a [RowResult],
}

impl ScoringReport {
    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts {
            n: self.rows.len(),
            ..LabelCounts::default()
        };
        for row in &self.rows {
            match row.label {
                Label::Planet => counts.planets += 1,
                Label::Candidate => counts.candidates += 1,
                Label::FalsePositive => counts.false_positives += 1,
            }
        }
        counts
    }

    /// `{ "summary": {...}, "rows": [...] }`
    pub fn to_json(&self) -> Result<String> {
        let export = Export {
            summary: ExportSummary {
                counts: self.counts(),
                label: self.aggregate.label,
                confidence: self.aggregate.confidence,
                target: self.selection.target.as_deref(),
                features: self.selection.chosen_features(),
                weights: &self.weights,
                weight_source: self.weight_source,
            },
            rows: &self.rows,
        };
        serde_json::to_string_pretty(&export).context("serializing report")
    }

    /// One line per row: `row,probability,label`. Rows are numbered from 1.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(["row", "probability", "label"])
            .context("writing CSV header")?;
        for row in &self.rows {
            writer
                .write_record([
                    (row.index + 1).to_string(),
                    row.probability.to_string(),
                    row.label.as_str().to_string(),
                ])
                .with_context(|| format!("writing CSV row {}", row.index))?;
        }
        writer.flush().context("flushing CSV")?;
        Ok(())
    }
}
