use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::model::Table;

/// Number of feature columns the model scores.
pub const FEATURE_COUNT: usize = 3;

/// Exact (case-insensitive) target names, in priority order.
const TARGET_NAMES: [&str; 2] = ["label", "y"];

/// Fallback target pattern, tried after [`TARGET_NAMES`].
static TARGET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(class|target|is_.*planet|confirmed)$").expect("static target pattern")
});

/// Canonical feature names, in priority order.
pub const FEATURE_KEYWORDS: [&str; 7] = [
    "transit_depth",
    "depth_ppm",
    "snr",
    "planet_radius",
    "orbital_period",
    "duration_hours",
    "period",
];

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Target and feature columns used by a scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub target: Option<String>,
    pub features: [Option<String>; FEATURE_COUNT],
}

impl ColumnSelection {
    /// Feature names that are set, in slot order.
    pub fn chosen_features(&self) -> Vec<&str> {
        self.features.iter().flatten().map(String::as_str).collect()
    }

    /// All feature slots filled.
    pub fn is_complete(&self) -> bool {
        self.features.iter().all(Option::is_some)
    }

    /// Replace detected columns with caller-supplied ones.
    pub fn apply(&mut self, overrides: &ColumnOverrides) {
        if let Some(target) = &overrides.target {
            self.target = non_empty(target);
        }
        if let Some(features) = &overrides.features {
            self.features = features.clone().map(|f| non_empty(&f));
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

/// Explicit column choices; when set they bypass detection verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    pub target: Option<String>,
    pub features: Option<[String; FEATURE_COUNT]>,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Guess the target column and up to [`FEATURE_COUNT`] feature columns
/// from the column names and the first row's cell types.
pub fn detect(table: &Table) -> ColumnSelection {
    let target = detect_target(&table.column_names);
    let features = detect_features(table, target.as_deref());
    log::debug!("detected target {target:?}, features {features:?}");
    ColumnSelection { target, features }
}

fn detect_target(columns: &[String]) -> Option<String> {
    TARGET_NAMES
        .iter()
        .find_map(|name| columns.iter().find(|c| c.eq_ignore_ascii_case(name)))
        .or_else(|| columns.iter().find(|c| TARGET_PATTERN.is_match(c)))
        .cloned()
}

fn detect_features(table: &Table, target: Option<&str>) -> [Option<String>; FEATURE_COUNT] {
    let columns = &table.column_names;
    let usable = |c: &String, picked: &[String]| Some(c.as_str()) != target && !picked.contains(c);

    let mut picked: Vec<String> = Vec::with_capacity(FEATURE_COUNT);
    for keyword in FEATURE_KEYWORDS {
        if picked.len() == FEATURE_COUNT {
            break;
        }
        if let Some(col) = columns.iter().find(|c| c.eq_ignore_ascii_case(keyword)) {
            if usable(col, &picked) {
                picked.push(col.clone());
            }
        }
    }

    if picked.len() < FEATURE_COUNT {
        let first = table.rows.first();
        for col in columns {
            if picked.len() == FEATURE_COUNT {
                break;
            }
            let numeric = first
                .and_then(|r| r.get(col))
                .and_then(|v| v.as_number())
                .is_some();
            if numeric && usable(col, &picked) {
                picked.push(col.clone());
            }
        }
    }

    let mut slots: [Option<String>; FEATURE_COUNT] = Default::default();
    for (slot, name) in slots.iter_mut().zip(picked) {
        *slot = Some(name);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    fn table(columns: &[&str], first: &[CellValue]) -> Table {
        let row: Row = columns
            .iter()
            .zip(first.iter().cloned())
            .map(|(c, v)| (c.to_string(), v))
            .collect();
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), vec![row])
    }

    fn nums(n: usize) -> Vec<CellValue> {
        (0..n).map(|i| CellValue::Integer(i as i64)).collect()
    }

    #[test]
    fn keyword_priority() {
        let t = table(&["id", "transit_depth", "snr", "period", "label"], &nums(5));
        let sel = detect(&t);
        assert_eq!(sel.target.as_deref(), Some("label"));
        assert_eq!(sel.chosen_features(), vec!["transit_depth", "snr", "period"]);
    }

    #[test]
    fn keywords_beat_column_order() {
        let t = table(&["Period", "SNR", "Depth_PPM", "Planet_Radius"], &nums(4));
        let sel = detect(&t);
        assert_eq!(sel.target, None);
        assert_eq!(sel.chosen_features(), vec!["Depth_PPM", "SNR", "Planet_Radius"]);
    }

    #[test]
    fn target_and_features_fold_case_alike() {
        let t = table(&["LABEL", "Transit_Depth", "sNr", "PERIOD"], &nums(4));
        let sel = detect(&t);
        assert_eq!(sel.target.as_deref(), Some("LABEL"));
        assert_eq!(sel.chosen_features(), vec!["Transit_Depth", "sNr", "PERIOD"]);
    }

    #[test]
    fn target_priority() {
        let cols = |names: &[&str]| names.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(detect_target(&cols(&["Y", "Label"])).as_deref(), Some("Label"));
        assert_eq!(detect_target(&cols(&["confirmed", "y"])).as_deref(), Some("y"));
        assert_eq!(detect_target(&cols(&["a", "Is_Exo_Planet"])).as_deref(), Some("Is_Exo_Planet"));
        assert_eq!(detect_target(&cols(&["a", "targets", "classes"])), None);
    }

    #[test]
    fn fallback_uses_first_row_numeric_columns() {
        let first = vec![
            CellValue::Text("KOI-1".into()),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Integer(1),
            CellValue::Float(7.0),
            CellValue::Bool(true),
            CellValue::Float(2.0),
        ];
        let t = table(&["name", "snr", "mag", "class", "teff", "flag", "logg"], &first);
        let sel = detect(&t);
        assert_eq!(sel.target.as_deref(), Some("class"));
        assert_eq!(sel.chosen_features(), vec!["snr", "teff", "logg"]);
    }

    #[test]
    fn fewer_than_three_is_not_an_error() {
        let t = table(&["snr", "label", "note"], &[
            CellValue::Float(1.0),
            CellValue::Integer(0),
            CellValue::Text("x".into()),
        ]);
        let sel = detect(&t);
        assert_eq!(sel.chosen_features(), vec!["snr"]);
        assert!(!sel.is_complete());
    }

    #[test]
    fn overrides_replace_detection() {
        let t = table(&["id", "transit_depth", "snr", "period", "label"], &nums(5));
        let mut sel = detect(&t);
        sel.apply(&ColumnOverrides {
            target: Some(String::new()),
            features: Some(["id".into(), "snr".into(), "label".into()]),
        });
        assert_eq!(sel.target, None);
        assert_eq!(sel.chosen_features(), vec!["id", "snr", "label"]);
    }

    #[test]
    fn overrides_deserialize_with_defaults() {
        let o: ColumnOverrides = serde_json::from_str(r#"{"features": ["snr", "period", "teff"]}"#).unwrap();
        assert_eq!(o.target, None);
        assert_eq!(o.features, Some(["snr".into(), "period".into(), "teff".into()]));
        let empty: ColumnOverrides = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ColumnOverrides::default());
    }
}
