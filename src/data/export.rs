use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{is_midnight, CellValue, Month, Table};

/// UTF-8 byte-order mark written ahead of the CSV ("utf-8-sig").
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Date format per column: date-only when every date in the column sits at
/// midnight, full timestamp otherwise.
fn column_date_formats(table: &Table) -> Vec<&'static str> {
    (0..table.columns.len())
        .map(|col| {
            let all_midnight = table
                .rows
                .iter()
                .filter_map(|row| row.get(col).and_then(CellValue::as_datetime))
                .all(is_midnight);
            if all_midnight {
                DATE_FMT
            } else {
                DATETIME_FMT
            }
        })
        .collect()
}

/// Every cell as display text: dates formatted per column, anything else
/// coerced to its string form. Used by both the preview and the CSV.
pub fn display_rows(table: &Table) -> Vec<Vec<String>> {
    let formats = column_date_formats(table);
    table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&formats)
                .map(|(cell, fmt)| match cell {
                    CellValue::DateTime(dt) => dt.format(fmt).to_string(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// `filtered_data_<month>.csv`
pub fn csv_file_name(month: Month) -> String {
    format!("filtered_data_{month}.csv")
}

/// Write `table` as comma-separated UTF-8 with a BOM, header row first,
/// no index column.
pub fn write_csv<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM).context("writing BOM")?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)
        .context("writing CSV header")?;
    for (i, row) in display_rows(table).iter().enumerate() {
        wtr.write_record(row)
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// The CSV as an in-memory buffer, ready to hand to a save dialog.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

pub fn save_csv(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, std::io::BufWriter::new(file))?;
    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_by_month;
    use chrono::NaiveDate;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn people() -> Table {
        Table::new(
            vec![
                "Name".into(),
                "Birth".into(),
                "Death".into(),
                "Other".into(),
                "Age".into(),
                "Score".into(),
            ],
            vec![
                vec![s("Ann, Jr."), s("2024-03-05"), s("n/a"), CellValue::Empty, CellValue::Integer(4), CellValue::Float(1.5)],
                vec![s("Bob"), s("1990-01-01"), s("2020-03-01 10:15:00"), CellValue::Empty, CellValue::Empty, CellValue::Bool(true)],
                vec![s("Cy"), s("1980-06-01"), CellValue::Empty, CellValue::Empty, CellValue::Integer(44), CellValue::Float(2.0)],
            ],
        )
    }

    #[test]
    fn file_name_pattern() {
        assert_eq!(csv_file_name(Month::new(3).unwrap()), "filtered_data_3.csv");
        assert_eq!(csv_file_name(Month::new(11).unwrap()), "filtered_data_11.csv");
    }

    #[test]
    fn dates_formatted_per_column() {
        let out = filter_by_month(&people(), Month::new(3).unwrap());
        let rows = display_rows(&out);
        assert_eq!(
            rows[0],
            vec!["Ann, Jr.", "2024-03-05", "", "", "4", "1.5"]
        );
        // Death has a time component in one row, so the whole column carries it.
        assert_eq!(
            rows[1],
            vec!["Bob", "1990-01-01", "2020-03-01 10:15:00", "", "", "true"]
        );
    }

    #[test]
    fn csv_starts_with_bom_and_header() {
        let t = Table::new(vec!["Birth".into(), "Death".into()], Vec::new());
        let bytes = to_csv_bytes(&t).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text.trim_end(), "Birth,Death");
    }

    #[test]
    fn csv_round_trip_keeps_rows_and_text() {
        let out = filter_by_month(&people(), Month::new(3).unwrap());
        let bytes = to_csv_bytes(&out).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&bytes[UTF8_BOM.len()..]);
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, out.columns);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), out.len());

        let expected = display_rows(&out);
        for (record, row) in records.iter().zip(&expected) {
            // Name, Age and Score are the non-date columns.
            for col in [0, 4, 5] {
                assert_eq!(&record[col], row[col].as_str());
            }
        }
        assert_eq!(&records[0][0], "Ann, Jr.");
    }

    #[test]
    fn save_csv_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let date = NaiveDate::from_ymd_opt(2001, 9, 9).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let t = Table::new(
            vec!["Birth".into()],
            vec![vec![CellValue::DateTime(date)]],
        );
        save_csv(&t, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["Birth", "2001-09-09"]);
    }
}
