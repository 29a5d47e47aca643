use std::path::Path;

use eframe::egui::{self, Color32, ComboBox, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use transit_scout::data::demo::demo_table;
use transit_scout::scoring::FEATURE_COUNT;

use crate::state::{AppState, PREVIEW_ROWS, Tab};

/// Rows and seed of the built-in demo dataset.
const DEMO_ROWS: usize = 120;
const DEMO_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load demo data").clicked() {
                state.set_table("demo_exoplanets.csv".into(), demo_table(DEMO_ROWS, DEMO_SEED));
                ui.close_menu();
            }
            ui.separator();
            ui.add_enabled_ui(state.report.is_some(), |ui: &mut Ui| {
                if ui.button("Export CSV…").clicked() {
                    export_dialog(state, ExportFormat::Csv);
                    ui.close_menu();
                }
                if ui.button("Export JSON…").clicked() {
                    export_dialog(state, ExportFormat::Json);
                    ui.close_menu();
                }
            });
        });

        ui.separator();

        if ui.selectable_label(state.dark_mode, "Dark theme").clicked() {
            state.dark_mode = !state.dark_mode;
        }

        ui.separator();

        if let (Some(name), Some(table)) = (&state.file_name, &state.table) {
            ui.label(format!(
                "{name}: {} rows, {} columns",
                table.len(),
                table.column_names.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – column selection and run button
// ---------------------------------------------------------------------------

/// Render the left panel with the target/feature pickers.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Columns");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };
    let columns = table.column_names.clone();

    ui.strong("Target");
    column_combo(ui, "target", &mut state.selection.target, &columns);
    ui.add_space(6.0);

    for slot in 0..FEATURE_COUNT {
        ui.strong(format!("Feature {}", slot + 1));
        column_combo(ui, slot, &mut state.selection.features[slot], &columns);
    }

    ui.add_space(6.0);
    if ui.small_button("Detect again").clicked() {
        state.redetect();
    }

    ui.add_space(12.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if ui.button(RichText::new("Run prediction").strong()).clicked() {
            state.run_prediction();
        }
    });

    ui.add_space(8.0);
    let fraction = state.progress().unwrap_or(0.0);
    ui.add(egui::ProgressBar::new(fraction).show_percentage());
}

fn column_combo(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    current: &mut Option<String>,
    columns: &[String],
) {
    let text = current.clone().unwrap_or_else(|| "(none)".into());
    ComboBox::from_id_salt(id_salt)
        .selected_text(text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(current, None, "(none)");
            for col in columns {
                ui.selectable_value(current, Some(col.clone()), col);
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – tabs
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Upload, RichText::new("Upload").heading());
        ui.selectable_value(&mut state.tab, Tab::Results, RichText::new("Results").heading());
    });
    ui.separator();

    match state.tab {
        Tab::Upload => upload_tab(ui, state),
        Tab::Results => super::results::results_tab(ui, state),
    }
}

fn upload_tab(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload your exoplanet dataset  (File → Open…)");
        });
        return;
    };

    let preview = table.preview(PREVIEW_ROWS);
    let columns = &table.column_names;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), columns.len())
            .header(20.0, |mut header| {
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|mut body| {
                for row in preview {
                    body.row(18.0, |mut cells| {
                        for col in columns {
                            cells.col(|ui: &mut Ui| {
                                match row.get(col) {
                                    Some(v) if v.as_number().is_some() => {
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui: &mut Ui| ui.monospace(v.to_string()),
                                        );
                                    }
                                    Some(v) if !v.is_missing() => {
                                        ui.label(v.to_string());
                                    }
                                    _ => {
                                        ui.label("");
                                    }
                                }
                            });
                        }
                    });
                }
            });
    });

    ui.add_space(4.0);
    ui.small(format!(
        "Showing the first {} rows · total rows: {}",
        preview.len(),
        table.len()
    ));
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transit data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let (name, filter) = match format {
        ExportFormat::Csv => ("predictions.csv", "csv"),
        ExportFormat::Json => ("predictions.json", "json"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export predictions")
        .add_filter(filter, &[filter])
        .set_file_name(name)
        .save_file()
    else {
        return;
    };

    if let Err(e) = export_report(state, &path, format) {
        log::error!("Export failed: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    } else {
        log::info!("Exported predictions to {}", path.display());
    }
}

fn export_report(state: &AppState, path: &Path, format: ExportFormat) -> anyhow::Result<()> {
    use anyhow::Context;

    let report = state.report.as_ref().context("no prediction to export")?;
    match format {
        ExportFormat::Csv => {
            let file = std::fs::File::create(path).context("creating CSV file")?;
            report.write_csv(file)
        }
        ExportFormat::Json => {
            std::fs::write(path, report.to_json()?).context("writing JSON file")
        }
    }
}
