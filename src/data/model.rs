use std::fmt;

use chrono::{NaiveDateTime, Timelike};

use super::FilterError;

/// Columns that carry the dates the month filter looks at.
pub const DATE_COLUMNS: [&str; 3] = ["Birth", "Death", "Other"];

// ---------------------------------------------------------------------------
// CellValue – a single cell of a worksheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a spreadsheet can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Blank cell, spreadsheet error, or a date that failed to parse.
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on whole floats ("3.0", not "3").
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::DateTime(dt) => {
                if is_midnight(dt) {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

pub(crate) fn is_midnight(dt: &NaiveDateTime) -> bool {
    dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0
}

// ---------------------------------------------------------------------------
// Month – validated 1..=12
// ---------------------------------------------------------------------------

/// A calendar month number. Construction rejects anything outside 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u32);

impl Month {
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Month(month))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Month {
    type Error = FilterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Month::new(value).ok_or(FilterError::InvalidMonth(value))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Table – one worksheet worth of rows
// ---------------------------------------------------------------------------

/// Ordered columns and ordered rows. Every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, padding or truncating rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the table keeping only the rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}
