use std::path::Path;
use std::time::{Duration, Instant};

use transit_scout::data::model::Table;
use transit_scout::scoring::filter::{LabelFilter, filtered_indices, init_label_filter};
use transit_scout::scoring::{self, ColumnSelection, Label, ScoringError, ScoringReport, detect};

/// Rows shown in the upload preview.
pub const PREVIEW_ROWS: usize = 8;

/// Progress bar step: 3% every 80 ms.
const PROGRESS_STEP: f32 = 0.03;
const PROGRESS_TICK: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upload,
    Results,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// Name of the loaded file, for the header.
    pub file_name: Option<String>,

    /// Target / feature columns, pre-filled by detection and editable.
    pub selection: ColumnSelection,

    /// Result of the last prediction run.
    pub report: Option<ScoringReport>,

    /// Labels shown in the results list.
    pub label_filter: LabelFilter,

    /// Indices into `report.rows` passing the label filter (cached).
    pub visible_rows: Vec<usize>,

    /// Start of the cosmetic progress animation.
    pub progress_started: Option<Instant>,

    pub tab: Tab,

    pub dark_mode: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            file_name: None,
            selection: ColumnSelection::default(),
            report: None,
            label_filter: init_label_filter(),
            visible_rows: Vec::new(),
            progress_started: None,
            tab: Tab::Upload,
            dark_mode: true,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, detect columns and drop old results.
    /// A table without rows is kept for the preview but gets no selection.
    pub fn set_table(&mut self, name: String, table: Table) {
        if table.is_empty() {
            log::warn!("{name}: no data rows");
            self.selection = ColumnSelection::default();
            self.status_message = Some(format!("Error: {}", ScoringError::EmptyDataset));
        } else {
            self.selection = detect::detect(&table);
            log::info!(
                "{name}: {} rows, target {:?}, features {:?}",
                table.len(),
                self.selection.target,
                self.selection.chosen_features()
            );
            self.status_message = (!self.selection.is_complete()).then(|| {
                "Fewer than three numeric columns detected; pick the features manually.".into()
            });
        }

        self.table = Some(table);
        self.file_name = Some(name);
        self.report = None;
        self.visible_rows.clear();
        self.progress_started = None;
        self.tab = Tab::Upload;
    }

    /// Load a file from disk and ingest it, reporting failures in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match transit_scout::data::loader::load_file(path) {
            Ok(table) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_table(name, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run column detection on the loaded table.
    pub fn redetect(&mut self) {
        if let Some(table) = self.table.as_ref().filter(|t| !t.is_empty()) {
            self.selection = detect::detect(table);
        }
    }

    /// Score the loaded table with the current selection. A new run
    /// replaces the previous report.
    pub fn run_prediction(&mut self) {
        let Some(table) = &self.table else {
            self.status_message = Some("Load a CSV file first.".into());
            return;
        };

        self.report = None;
        self.visible_rows.clear();
        self.progress_started = Some(Instant::now());

        match scoring::score_selection(table, &self.selection) {
            Ok(report) => {
                self.report = Some(report);
                self.status_message = None;
                self.tab = Tab::Results;
                self.refilter();
            }
            Err(e) => {
                log::error!("Prediction failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Fraction shown by the progress bar; purely cosmetic.
    pub fn progress(&self) -> Option<f32> {
        let started = self.progress_started?;
        let ticks = (started.elapsed().as_millis() / PROGRESS_TICK.as_millis()) as f32;
        Some((ticks * PROGRESS_STEP).min(1.0))
    }

    /// Recompute `visible_rows` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(report) = &self.report {
            self.visible_rows = filtered_indices(&report.rows, &self.label_filter);
        }
    }

    /// Toggle one label in the results filter.
    pub fn toggle_label(&mut self, label: Label) {
        if !self.label_filter.remove(&label) {
            self.label_filter.insert(label);
        }
        self.refilter();
    }
}
