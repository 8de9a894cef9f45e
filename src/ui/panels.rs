use eframe::egui::{self, Color32, RichText, Ui};

use month_filter::data::export::csv_file_name;
use month_filter::data::loader::SUPPORTED_EXTENSIONS;

use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – sheet, month and actions
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter by Month");
    ui.separator();

    if state.path.is_none() {
        ui.label("No file loaded.");
        if ui.button("Open…").clicked() {
            open_file_dialog(state);
        }
        status_label(ui, state);
        return;
    }

    // ---- Sheet selector ----
    ui.strong("Sheet");
    let current = state.selected_sheet.clone().unwrap_or_default();
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt("sheet")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for sheet in &state.sheets {
                if ui.selectable_label(current == *sheet, sheet).clicked() && current != *sheet {
                    picked = Some(sheet.clone());
                }
            }
        });
    if let Some(sheet) = picked {
        state.select_sheet(sheet);
    }
    ui.separator();

    // ---- Month input ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Month (1-12):");
        ui.add(egui::DragValue::new(&mut state.month).range(1..=12).speed(0.1));
    });
    ui.add_space(4.0);

    if ui
        .add_enabled(state.can_filter(), egui::Button::new("Filter Data"))
        .clicked()
    {
        state.run_filter();
    }

    // ---- Download ----
    if state.result.is_some() {
        ui.add_space(4.0);
        if ui.button("Download Filtered Data as CSV").clicked() {
            save_file_dialog(state);
        }
    }

    ui.separator();
    status_label(ui, state);
}

fn status_label(ui: &mut Ui, state: &AppState) {
    let Some(status) = &state.status else {
        return;
    };
    let text = match status {
        Status::Info(msg) => RichText::new(msg),
        Status::Success(msg) => RichText::new(msg).color(Color32::from_rgb(60, 170, 90)),
        Status::Warning(msg) => RichText::new(msg).color(Color32::from_rgb(220, 160, 40)),
        Status::Error(msg) => RichText::new(msg).color(Color32::RED),
    };
    ui.label(text);
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
            let can_save = state.result.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.path {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(name);
        }
        if let Some(table) = &state.table {
            ui.label(format!("{} rows", table.len()));
        }
        if let Some(view) = &state.result {
            ui.label(format!("{} matching month {}", view.table.len(), view.month));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open spreadsheet")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"]);
    if let Some(dir) = &state.config.start_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        state.open_file(path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let Some(view) = &state.result else {
        return;
    };
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(csv_file_name(view.month))
        .add_filter("CSV", &["csv"]);
    if let Some(dir) = &state.config.start_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.save_file() {
        if let Err(e) = state.save_result(&path) {
            log::error!("Failed to save CSV: {e:#}");
            state.status = Some(Status::Error(format!("Error: {e:#}")));
        }
    }
}
