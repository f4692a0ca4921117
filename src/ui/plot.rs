use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::histogram::Histogram;

// ---------------------------------------------------------------------------
// Histogram plot (central panel)
// ---------------------------------------------------------------------------

/// Render `histogram` as bars stacked by category.
pub fn histogram_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    histogram: &Histogram,
    color_map: Option<&ColorMap>,
) {
    if histogram.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows match the current filters");
        });
        return;
    }

    let width = histogram.bin_width();
    let mut charts: Vec<BarChart> = Vec::new();

    for (label, counts) in histogram.groups() {
        let color = color_map
            .map(|cm| cm.color_for(label))
            .unwrap_or(Color32::LIGHT_BLUE);

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let (lo, hi) = histogram.bin_range(i);
                Bar::new(histogram.bin_center(i), count as f64)
                    .width(width)
                    .name(format!("{label} {lo:.1} to {hi:.1}"))
            })
            .collect();

        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(label)
            .color(color)
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
