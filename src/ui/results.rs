use eframe::egui::{self, Frame, RichText, ScrollArea, Ui};

use transit_scout::scoring::filter::LabelFilter;
use transit_scout::scoring::{Label, ScoringReport, WeightSource};

use crate::color::{label_color, label_fill};
use crate::state::AppState;

use super::plot::probability_plot;

/// Render the results tab: summary card, plot, label filter and row list.
pub fn results_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load data in the Upload tab and press “Run prediction”.");
        });
        return;
    };

    summary_card(ui, report);
    ui.add_space(8.0);

    probability_plot(ui, report, &state.visible_rows);
    ui.add_space(8.0);

    let toggled = label_filter_row(ui, &state.label_filter);
    ui.separator();

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, row_height, state.visible_rows.len(), |ui: &mut Ui, range| {
            for &i in &state.visible_rows[range] {
                let row = &report.rows[i];
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(format!("Row #{}", row.index + 1));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                        badge(ui, row.label);
                        ui.label(format!("{:.1}%", row.probability * 100.0));
                    });
                });
            }
        });

    if let Some(label) = toggled {
        state.toggle_label(label);
    }
}

/// Label checkboxes; returns the label whose box was clicked this frame.
fn label_filter_row(ui: &mut Ui, filter: &LabelFilter) -> Option<Label> {
    let mut toggled = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Show");
        for label in Label::ALL {
            let mut checked = filter.contains(&label);
            let text = RichText::new(label.to_string()).color(label_color(label));
            if ui.checkbox(&mut checked, text).changed() {
                toggled = Some(label);
            }
        }
    });
    toggled
}

fn summary_card(ui: &mut Ui, report: &ScoringReport) {
    let aggregate = report.aggregate;
    let counts = report.counts();
    let fill = aggregate.label.map(label_fill).unwrap_or_default();

    Frame::group(ui.style()).fill(fill).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        if let Some(label) = aggregate.label {
            ui.label(RichText::new(label.to_string()).heading().color(label_color(label)));
        }
        ui.label(format!("Confidence: {:.1}%", aggregate.confidence * 100.0));
        ui.small(format!(
            "{} rows · {} planets · {} candidates · {} not planets",
            counts.n, counts.planets, counts.candidates, counts.false_positives
        ));

        let source = match report.weight_source {
            WeightSource::Correlation => "correlation with target",
            WeightSource::Keyword => "column-name keywords",
        };
        let weights = report
            .selection
            .chosen_features()
            .iter()
            .zip(report.weights.weights)
            .map(|(name, w)| format!("{name} {w:+.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        ui.small(format!("Weights ({source}): {weights}"));
    });
}

fn badge(ui: &mut Ui, label: Label) {
    Frame::new()
        .fill(label_fill(label))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(label.to_string()).color(label_color(label)));
        });
}
