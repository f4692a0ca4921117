use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{GroupBy, Sex};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from teal.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (175.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colours for the sex groups: male blue, female red.
fn sex_color(sex: Sex) -> Color32 {
    match sex {
        Sex::Male => Color32::from_rgb(66, 110, 230),
        Sex::Female => Color32::from_rgb(220, 60, 60),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of the grouping column to histogram colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub group: GroupBy,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(group: GroupBy, labels: &BTreeSet<String>) -> Self {
        let mapping = match group {
            GroupBy::Sex => labels
                .iter()
                .filter_map(|l| l.parse::<Sex>().ok().map(|s| (l.clone(), sex_color(s))))
                .collect(),
            GroupBy::Smoker | GroupBy::Region => labels
                .iter()
                .cloned()
                .zip(generate_palette(labels.len()))
                .collect(),
        };

        ColorMap {
            group,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
