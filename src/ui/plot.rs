use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, HLine, Legend, Plot};

use transit_scout::scoring::{Label, ScoringReport};

use crate::color::{label_color, threshold_color};

// ---------------------------------------------------------------------------
// Probability plot (results tab)
// ---------------------------------------------------------------------------

/// Bar per visible row, coloured by label, with the label thresholds drawn.
pub fn probability_plot(ui: &mut Ui, report: &ScoringReport, visible: &[usize]) {
    let charts: Vec<BarChart> = Label::ALL
        .into_iter()
        .map(|label| {
            let bars: Vec<Bar> = visible
                .iter()
                .map(|&i| &report.rows[i])
                .filter(|r| r.label == label)
                .map(|r| {
                    Bar::new((r.index + 1) as f64, r.probability)
                        .width(0.8)
                        .name(format!("Row #{}", r.index + 1))
                })
                .collect();
            BarChart::new(bars).color(label_color(label)).name(label.to_string())
        })
        .collect();

    Plot::new("probability_plot")
        .legend(Legend::default())
        .height(220.0)
        .x_axis_label("Row")
        .y_axis_label("Probability")
        .include_y(0.0)
        .include_y(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            for y in [0.40, 0.70] {
                plot_ui.hline(
                    HLine::new(y)
                        .color(threshold_color())
                        .name(format!("p = {y:.2}")),
                );
            }
        });
}
