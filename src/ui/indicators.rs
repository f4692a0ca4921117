use eframe::egui::{self, RichText, Ui};

use crate::data::stats::SummaryStatistics;

/// Render the five summary indicators in a wrapping row.
pub fn summary_strip(ui: &mut Ui, summary: &SummaryStatistics) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        indicator(ui, "Count", summary.count.to_string());
        indicator(ui, "Mean Charges ($)", format_thousands(summary.mean));
        indicator(ui, "Total Charges ($)", format_thousands(summary.sum));
        indicator(ui, "Stdev Charges ($)", format_thousands(summary.stdev));
        indicator(ui, "Median Charges ($)", format_thousands(summary.median));
    });
}

fn indicator(ui: &mut Ui, name: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(150.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(name).weak());
            ui.label(RichText::new(value).size(28.0).strong());
        });
    });
}

/// Round to whole units and group digits with commas: `12345.6` → `12,346`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn groups_digits() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(999.5), "1,000");
        assert_eq!(format_thousands(13270.422265), "13,270");
        assert_eq!(format_thousands(17755824.990759), "17,755,825");
        assert_eq!(format_thousands(-1234567.0), "-1,234,567");
        assert_eq!(format_thousands(-0.3), "0");
    }
}
