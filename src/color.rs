use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use transit_scout::scoring::Label;

// ---------------------------------------------------------------------------
// Label colours
// ---------------------------------------------------------------------------

fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Green for planets, amber for candidates, rose for false positives.
pub fn label_color(label: Label) -> Color32 {
    match label {
        Label::Planet => hsl(152.0, 0.70, 0.45),
        Label::Candidate => hsl(38.0, 0.90, 0.50),
        Label::FalsePositive => hsl(350.0, 0.80, 0.58),
    }
}

/// Translucent fill for cards and badges of a label.
pub fn label_fill(label: Label) -> Color32 {
    label_color(label).gamma_multiply(0.2)
}

/// Colour of the threshold guide lines in the probability plot.
pub fn threshold_color() -> Color32 {
    hsl(200.0, 0.85, 0.60)
}
