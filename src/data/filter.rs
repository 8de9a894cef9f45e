use chrono::Datelike;

use super::dates::parse_date;
use super::model::{CellValue, Month, Table, DATE_COLUMNS};
use super::FilterError;

// ---------------------------------------------------------------------------
// Column validation
// ---------------------------------------------------------------------------

/// Required date columns absent from `table`, in `DATE_COLUMNS` order.
pub fn missing_columns(table: &Table) -> Vec<String> {
    DATE_COLUMNS
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect()
}

/// Check that the filter can run on `table`.
pub fn validate_columns(table: &Table) -> Result<(), FilterError> {
    let missing = missing_columns(table);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FilterError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Month filter
// ---------------------------------------------------------------------------

/// Replace every Birth/Death/Other cell with its parsed date, or `Empty`
/// when it does not parse. Already-parsed cells are left as they are.
pub fn coerce_date_columns(table: &mut Table) {
    let indices: Vec<usize> = DATE_COLUMNS
        .iter()
        .filter_map(|col| table.column_index(col))
        .collect();

    for row in &mut table.rows {
        for &idx in &indices {
            if let Some(cell) = row.get_mut(idx) {
                *cell = match parse_date(cell) {
                    Some(dt) => CellValue::DateTime(dt),
                    None => CellValue::Empty,
                };
            }
        }
    }
}

/// Indices of rows whose Birth, Death or Other date falls in `month`.
///
/// Reads the date columns as they are; call [`coerce_date_columns`] first
/// on raw data.
pub fn matching_rows(table: &Table, month: Month) -> Vec<usize> {
    let indices: Vec<usize> = DATE_COLUMNS
        .iter()
        .filter_map(|col| table.column_index(col))
        .collect();

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            indices.iter().any(|&idx| {
                row.get(idx)
                    .and_then(CellValue::as_datetime)
                    .is_some_and(|dt| dt.month() == month.get())
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rows of `table` with a Birth, Death or Other date in `month`.
///
/// Works on a private copy: the date columns of the result hold parsed
/// dates (or `Empty`), the caller's table is untouched.
pub fn filter_by_month(table: &Table, month: Month) -> Table {
    let mut working = table.clone();
    coerce_date_columns(&mut working);
    let selected = matching_rows(&working, month);
    log::debug!(
        "month {month}: {} of {} rows selected",
        selected.len(),
        working.len()
    );
    working.select_rows(&selected)
}
