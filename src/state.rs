use std::path::{Path, PathBuf};

use anyhow::Result;

use month_filter::config::AppConfig;
use month_filter::data::export::{display_rows, save_csv};
use month_filter::data::filter::missing_columns;
use month_filter::data::loader::{load_sheet, sheet_names};
use month_filter::data::model::{Month, Table};
use month_filter::data::FilterError;
use month_filter::pipeline::{filter_loaded, FilterOutcome};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Filter result held for preview / download
// ---------------------------------------------------------------------------

pub struct FilteredView {
    pub month: Month,
    pub table: Table,
    /// Display strings, computed once per filter run.
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Opened file (None until the user picks one).
    pub path: Option<PathBuf>,

    /// Sheets of the opened file.
    pub sheets: Vec<String>,

    /// Currently selected sheet.
    pub selected_sheet: Option<String>,

    /// Raw rows of the selected sheet. Never modified by filtering.
    pub table: Option<Table>,

    /// Required columns the selected sheet lacks.
    pub missing_columns: Vec<String>,

    /// Month input, kept in 1..=12 by the widget.
    pub month: u32,

    /// Last successful filter result with matches.
    pub result: Option<FilteredView>,

    /// Message shown under the controls.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            month: config.default_month.clamp(1, 12),
            config,
            path: None,
            sheets: Vec::new(),
            selected_sheet: None,
            table: None,
            missing_columns: Vec::new(),
            result: None,
            status: None,
        }
    }

    /// Open a file, list its sheets and load the first one.
    pub fn open_file(&mut self, path: PathBuf) {
        self.clear_file();
        match sheet_names(&path) {
            Ok(sheets) if sheets.is_empty() => {
                self.status = Some(Status::Error(format!(
                    "{} contains no sheets",
                    path.display()
                )));
            }
            Ok(sheets) => {
                log::info!("Opened {} with sheets {:?}", path.display(), sheets);
                let first = sheets[0].clone();
                self.sheets = sheets;
                self.path = Some(path);
                self.select_sheet(first);
            }
            Err(e) => {
                log::error!("Failed to open file: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Load `sheet` from the open file and check its columns.
    pub fn select_sheet(&mut self, sheet: String) {
        let Some(path) = self.path.clone() else {
            return;
        };
        self.result = None;
        self.table = None;
        self.missing_columns.clear();
        self.selected_sheet = Some(sheet.clone());

        match load_sheet(&path, &sheet) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load sheet '{sheet}': {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Ingest a newly loaded sheet.
    pub fn set_table(&mut self, table: Table) {
        self.missing_columns = missing_columns(&table);
        self.status = if self.missing_columns.is_empty() {
            Some(Status::Info(format!(
                "{} rows, {} columns",
                table.len(),
                table.columns.len()
            )))
        } else {
            Some(Status::Error(
                FilterError::MissingColumns(self.missing_columns.clone()).to_string(),
            ))
        };
        self.result = None;
        self.table = Some(table);
    }

    /// Whether the Filter button should be enabled.
    pub fn can_filter(&self) -> bool {
        self.table.is_some() && self.missing_columns.is_empty()
    }

    /// Run the month filter on the raw sheet.
    pub fn run_filter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let month = match Month::try_from(self.month) {
            Ok(m) => m,
            Err(e) => {
                self.status = Some(Status::Error(e.to_string()));
                return;
            }
        };

        match filter_loaded(table, month) {
            Ok(FilterOutcome::Found(filtered)) => {
                self.status = Some(Status::Success(format!(
                    "Found {} records for the selected month.",
                    filtered.len()
                )));
                let rows = display_rows(&filtered);
                self.result = Some(FilteredView {
                    month,
                    table: filtered,
                    rows,
                });
            }
            Ok(FilterOutcome::NoRecords) => {
                self.result = None;
                self.status = Some(Status::Warning(
                    "No records found for the selected month.".to_string(),
                ));
            }
            Err(e) => {
                self.result = None;
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// Write the current result to `path`.
    pub fn save_result(&mut self, path: &Path) -> Result<()> {
        let Some(view) = &self.result else {
            anyhow::bail!("nothing to save");
        };
        save_csv(&view.table, path)?;
        self.status = Some(Status::Success(format!(
            "Saved {} rows to {}",
            view.table.len(),
            path.display()
        )));
        Ok(())
    }

    fn clear_file(&mut self) {
        self.path = None;
        self.sheets.clear();
        self.selected_sheet = None;
        self.table = None;
        self.missing_columns.clear();
        self.result = None;
        self.status = None;
    }
}
