use std::fmt;

use eframe::egui::{self, emath::Numeric, Color32, RichText, ScrollArea, Ui};

use crate::data::export::write_csv;
use crate::data::filter::{Bounds, Choice, FilterCriteria};
use crate::data::model::{GroupBy, Sex, Smoker};
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Recomputes the view only when a widget
/// changed this frame.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Owned copies so `state` can be mutated inside the scroll area.
    let full = FilterCriteria::unrestricted(dataset);
    let regions: Vec<String> = dataset.regions.iter().cloned().collect();

    let mut changed = false;
    let mut group_by = state.group_by;
    let mut reset = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let criteria = &mut state.criteria;
            changed |= range_sliders(ui, "Age Range", &mut criteria.age, full.age, 1.0);
            changed |= range_sliders(ui, "BMI Range", &mut criteria.bmi, full.bmi, 0.1);
            changed |= range_sliders(ui, "Charges Range", &mut criteria.charges, full.charges, 1.0);
            ui.separator();

            changed |= choice_combo(ui, "Smoker", &mut criteria.smoker, &Smoker::ALL);
            changed |= choice_combo(ui, "Region", &mut criteria.region, &regions);
            changed |= choice_combo(ui, "Sex", &mut criteria.sex, &Sex::ALL);
            ui.separator();

            ui.strong("Color by");
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(group_by.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for g in GroupBy::ALL {
                        ui.selectable_value(&mut group_by, g, g.label());
                    }
                });
            ui.separator();

            reset = ui.button("Reset filters").clicked();
        });

    if reset {
        state.reset_filters();
    } else if group_by != state.group_by {
        state.set_group_by(group_by);
    } else if changed {
        state.refilter();
    }
}

/// A min and a max slider over `full`. Moving one end past the other drags
/// the other end along.
fn range_sliders<T: Numeric>(
    ui: &mut Ui,
    label: &str,
    bounds: &mut Bounds<T>,
    full: Bounds<T>,
    step: f64,
) -> bool {
    ui.strong(label);
    let min_changed = ui
        .add(egui::Slider::new(&mut bounds.min, full.min..=full.max).text("min").step_by(step))
        .changed();
    if min_changed {
        bounds.clamp_max_to_min();
    }
    let max_changed = ui
        .add(egui::Slider::new(&mut bounds.max, full.min..=full.max).text("max").step_by(step))
        .changed();
    if max_changed {
        bounds.clamp_min_to_max();
    }
    min_changed || max_changed
}

/// Dropdown with an explicit "All" entry followed by `options`.
fn choice_combo<T>(ui: &mut Ui, label: &str, choice: &mut Choice<T>, options: &[T]) -> bool
where
    T: Clone + PartialEq + fmt::Display,
{
    let before = choice.clone();
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(choice.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(choice, Choice::All, "All");
            for opt in options {
                ui.selectable_value(choice, Choice::Only(opt.clone()), opt.to_string());
            }
        });
    *choice != before
}

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
            let has_data = state.dataset.is_some();
            if ui.add_enabled(has_data, egui::Button::new("Export view…")).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }
        if let Some(name) = state.source.as_ref().and_then(|p| p.file_name()) {
            ui.label(RichText::new(name.to_string_lossy()).weak());
        }

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open insurance data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

/// Save the rows currently in view as CSV.
pub fn export_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .add_filter("CSV", &["csv"])
        .set_file_name("insurance_filtered.csv")
        .save_file()
    else {
        return;
    };

    match write_csv(&path, state.visible_records()) {
        Ok(n) => {
            log::info!("Exported {n} rows to {}", path.display());
            state.status = Some(Status::Info(format!("Exported {n} rows")));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status = Some(Status::Error(format!("{e:#}")));
        }
    }
}
