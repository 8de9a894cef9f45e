use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, Table, DATE_COLUMNS};
use super::FilterError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extensions the loader understands, for file dialogs and error messages.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

enum Format {
    Workbook,
    Csv,
}

fn detect_format(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Format::Workbook),
        "csv" => Ok(Format::Csv),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Sheet names in file order. A CSV file has one sheet named after its stem.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    match detect_format(path)? {
        Format::Workbook => {
            let workbook = open_workbook_auto(path)
                .with_context(|| format!("opening workbook {}", path.display()))?;
            Ok(workbook.sheet_names())
        }
        Format::Csv => Ok(vec![csv_sheet_name(path)]),
    }
}

/// Read one sheet into a [`Table`]. The first row is the header.
pub fn load_sheet(path: &Path, sheet: &str) -> Result<Table> {
    let table = match detect_format(path)? {
        Format::Workbook => load_workbook_sheet(path, sheet)?,
        Format::Csv => {
            let name = csv_sheet_name(path);
            if sheet != name {
                return Err(FilterError::UnknownSheet {
                    name: sheet.to_string(),
                    available: vec![name],
                }
                .into());
            }
            load_csv(path)?
        }
    };
    log::info!(
        "Loaded sheet '{sheet}' from {}: {} rows, columns {:?}",
        path.display(),
        table.len(),
        table.columns
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader (xlsx / xls / ods)
// ---------------------------------------------------------------------------

fn load_workbook_sheet(path: &Path, sheet: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|s| s == sheet) {
        return Err(FilterError::UnknownSheet {
            name: sheet.to_string(),
            available,
        }
        .into());
    }

    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("reading sheet '{sheet}'"))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };
    let columns = header_names(header.iter().map(data_to_cell));
    let body = rows
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    Ok(Table::new(columns, body))
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(d) => CellValue::String(duration_text(d)),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// `[-]H:MM:SS`, hours not wrapped at 24 (Excel's `[h]:mm:ss`).
fn duration_text(d: chrono::Duration) -> String {
    let secs = d.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    format!("{sign}{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// Column names from header cells: blanks become `Unnamed: <i>` and repeats
/// get a `.1`, `.2`, ... suffix.
fn header_names(cells: impl Iterator<Item = CellValue>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    cells
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell {
                CellValue::Empty => format!("Unnamed: {i}"),
                other => other.to_string(),
            };
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{n}");
                n += 1;
            }
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn csv_sheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

/// Header row, then one record per row. Short rows are padded; fields past
/// the header get `Unnamed: <i>` columns. Birth/Death/Other keep their raw
/// text so `20240305` or `1987` reach the date parser.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut header: Vec<CellValue> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| {
            if h.is_empty() {
                CellValue::Empty
            } else {
                CellValue::String(h.to_string())
            }
        })
        .collect();
    let date_cols: Vec<bool> = header
        .iter()
        .map(|h| matches!(h, CellValue::String(name) if DATE_COLUMNS.contains(&name.as_str())))
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() > header.len() {
            log::warn!(
                "CSV row {row_no} has {} fields but the header has {}; adding unnamed columns",
                record.len(),
                header.len()
            );
            header.resize(record.len(), CellValue::Empty);
        }
        let row = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if date_cols.get(i).copied().unwrap_or(false) && !field.is_empty() {
                    CellValue::String(field.to_string())
                } else {
                    guess_cell_type(field)
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(header_names(header.into_iter()), rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return CellValue::Float(f);
        }
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}
