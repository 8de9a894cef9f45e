use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Result grid (central panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered rows, or a hint when there is nothing to show.
pub fn result_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.result else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.path.is_none() {
                "Open a spreadsheet to filter it  (File → Open…)"
            } else {
                "Pick a month and press Filter Data"
            };
            ui.heading(hint);
        });
        return;
    };

    let limit = state.config.preview_row_limit;
    let shown = view.rows.len().min(limit);
    if shown < view.rows.len() {
        ui.label(format!(
            "Showing the first {shown} of {} rows. The CSV contains all of them.",
            view.rows.len()
        ));
    }

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0).clip(true), view.table.columns.len())
            .header(ROW_HEIGHT, |mut header| {
                for name in &view.table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, shown, |mut row| {
                    let cells = &view.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
