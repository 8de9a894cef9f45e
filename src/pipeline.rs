use std::path::PathBuf;

use anyhow::Result;

use crate::data::filter::{filter_by_month, validate_columns};
use crate::data::loader::load_sheet;
use crate::data::model::{Month, Table};
use crate::data::FilterError;

// ---------------------------------------------------------------------------
// Request / outcome
// ---------------------------------------------------------------------------

/// Everything one filter run needs. Hosts own it; nothing is ambient.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub path: PathBuf,
    pub sheet: String,
    pub month: Month,
}

/// Result of a successful run. `NoRecords` is not an error, but there is
/// nothing to preview or save.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Found(Table),
    NoRecords,
}

impl FilterOutcome {
    pub fn table(&self) -> Option<&Table> {
        match self {
            FilterOutcome::Found(t) => Some(t),
            FilterOutcome::NoRecords => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Validate and filter a sheet the host already holds. `table` is not
/// modified, so repeated runs always start from the raw values.
pub fn filter_loaded(table: &Table, month: Month) -> Result<FilterOutcome, FilterError> {
    validate_columns(table)?;
    let filtered = filter_by_month(table, month);
    if filtered.is_empty() {
        log::info!("No records for month {month}");
        Ok(FilterOutcome::NoRecords)
    } else {
        log::info!("Found {} records for month {month}", filtered.len());
        Ok(FilterOutcome::Found(filtered))
    }
}

/// Load → validate → filter.
pub fn run(request: &FilterRequest) -> Result<FilterOutcome> {
    let table = load_sheet(&request.path, &request.sheet)?;
    Ok(filter_loaded(&table, request.month)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn write_people(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("people.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn end_to_end_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people(
            &dir,
            "Name,Birth,Death,Other\n\
             Ann,2024-03-05,,\n\
             Bob,not a date,2024-07-01,\n\
             Cy,,,\n",
        );

        let request = FilterRequest {
            path,
            sheet: "people".into(),
            month: Month::new(7).unwrap(),
        };
        let outcome = run(&request).unwrap();
        let table = outcome.table().expect("records expected");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], CellValue::String("Bob".into()));

        let none = run(&FilterRequest {
            month: Month::new(12).unwrap(),
            ..request
        })
        .unwrap();
        assert_eq!(none, FilterOutcome::NoRecords);
    }

    #[test]
    fn empty_sheet_reports_no_records() {
        let table = Table::new(
            vec!["Birth".into(), "Death".into(), "Other".into()],
            Vec::new(),
        );
        for m in 1..=12 {
            assert_eq!(
                filter_loaded(&table, Month::new(m).unwrap()),
                Ok(FilterOutcome::NoRecords)
            );
        }
    }

    #[test]
    fn missing_column_stops_before_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people(&dir, "Name,Birth,Death\nAnn,2024-03-05,\n");
        let err = run(&FilterRequest {
            path,
            sheet: "people".into(),
            month: Month::new(3).unwrap(),
        })
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<FilterError>(),
            Some(&FilterError::MissingColumns(vec!["Other".into()]))
        );
    }

    #[test]
    fn compact_and_year_only_dates_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people(
            &dir,
            "Name,Birth,Death,Other\n\
             Ann,20240305,,\n\
             Bob,1987,,\n",
        );
        let request = |m| FilterRequest {
            path: path.clone(),
            sheet: "people".into(),
            month: Month::new(m).unwrap(),
        };

        let march = run(&request(3)).unwrap();
        let table = march.table().expect("Ann matches March");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], CellValue::String("Ann".into()));

        let january = run(&request(1)).unwrap();
        let table = january.table().expect("Bob matches January");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], CellValue::String("Bob".into()));
    }
}
