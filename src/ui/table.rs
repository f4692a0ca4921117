use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Column, Record};
use crate::state::AppState;

/// Render the visible rows. Clicking a header sorts by that column.
pub fn records_table(ui: &mut Ui, state: &mut AppState) {
    let sort = state.sort;
    let rows: Vec<&Record> = state.visible_records().collect();
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(TableColumn::auto().at_least(70.0), Column::ALL.len() - 1)
        .column(TableColumn::remainder())
        .header(22.0, |mut header| {
            for col in Column::ALL {
                header.col(|ui: &mut Ui| {
                    let marker = match sort {
                        Some(o) if o.column == col && o.ascending => " ⬆",
                        Some(o) if o.column == col => " ⬇",
                        _ => "",
                    };
                    if ui.button(format!("{}{marker}", col.title())).clicked() {
                        clicked = Some(col);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let record = rows[row.index()];
                for col in Column::ALL {
                    row.col(|ui: &mut Ui| {
                        ui.label(record.cell_text(col));
                    });
                }
            });
        });

    if let Some(col) = clicked {
        state.toggle_sort(col);
    }
}
