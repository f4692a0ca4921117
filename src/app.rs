use eframe::egui::{self, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{indicators, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InsuranceDashboardApp {
    pub state: AppState,
}

impl InsuranceDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for InsuranceDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Header with summary indicators ----
        egui::TopBottomPanel::top("summary").show(ctx, |ui| {
            ui.heading("Insurance Dashboard");
            ui.label(
                "Filter the data by age, BMI, charges, smoker status, region and sex.",
            );
            ui.add_space(4.0);
            indicators::summary_strip(ui, &self.state.summary);
            ui.add_space(4.0);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: histograms / table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central(ui, &mut self.state);
        });
    }
}

fn central(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dataset  (File → Open…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
    ui.separator();

    let colors = state.color_map.as_ref();
    match state.tab {
        Tab::AgeHistogram => {
            plot::histogram_plot(ui, "age_hist", "age", &state.age_histogram, colors);
        }
        Tab::ChargesHistogram => {
            plot::histogram_plot(ui, "charges_hist", "charges ($)", &state.charges_histogram, colors);
        }
        Tab::Table => table::records_table(ui, state),
    }
}
