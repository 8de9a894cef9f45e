use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::model::CellValue;

// ---------------------------------------------------------------------------
// Lenient date parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Tried in order; month-first wins over day-first when both would fit.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%m/%d/%y",
    "%d %B %y",
    "%B %d, %y",
];

/// Interpret a cell as a date, or `None` when it is not recognisably one.
///
/// Never fails: blanks, junk text, numbers and booleans are all "missing".
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::String(s) => parse_date_str(s),
        CellValue::Integer(_) | CellValue::Float(_) | CellValue::Bool(_) | CellValue::Empty => {
            None
        }
    }
}

/// Text flavour of [`parse_date`].
pub fn parse_date_str(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Some(dt) = NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .filter(|dt| spells_out_year(s, fmt, dt.year()))
        {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(d) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .filter(|d| spells_out_year(s, fmt, d.year()))
        {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    parse_partial(s)
}

/// `%Y` happily reads "24" out of "March 2024" once `%d` has eaten "20".
/// Accept a `%Y` match only when the text holds the year as four digits.
fn spells_out_year(s: &str, fmt: &str, year: i32) -> bool {
    !fmt.contains("%Y") || (year >= 1000 && s.contains(&year.to_string()))
}

/// `YYYYMMDD`, `YYYY-MM`, `YYYY`, and `March 2024`, each pinned to the
/// first day of the period they name.
fn parse_partial(s: &str) -> Option<NaiveDateTime> {
    let all_digits = s.bytes().all(|b| b.is_ascii_digit());

    let date = if all_digits && s.len() == 8 {
        NaiveDate::from_ymd_opt(s[0..4].parse().ok()?, s[4..6].parse().ok()?, s[6..8].parse().ok()?)
    } else if all_digits && s.len() == 4 {
        NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)
    } else if let Some((y, m)) = s.split_once('-').filter(|(y, m)| {
        y.len() == 4 && (1..=2).contains(&m.len()) && is_digits(y) && is_digits(m)
    }) {
        NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1)
    } else {
        NaiveDate::parse_from_str(&format!("{s} 1"), "%B %Y %d").ok()
    };

    date?.and_hms_opt(0, 0, 0)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn ymd(s: &str) -> Option<(i32, u32, u32)> {
        parse_date_str(s).map(|dt| (dt.year(), dt.month(), dt.day()))
    }

    #[test]
    fn iso_dates_and_datetimes() {
        assert_eq!(ymd("2024-03-05"), Some((2024, 3, 5)));
        assert_eq!(ymd("  2024-03-05 "), Some((2024, 3, 5)));
        assert_eq!(ymd("2024-03-05 14:30:00"), Some((2024, 3, 5)));
        assert_eq!(ymd("2024-03-05T14:30:00.250"), Some((2024, 3, 5)));
        assert_eq!(ymd("2024-03-05T23:30:00+02:00"), Some((2024, 3, 5)));
        let dt = parse_date_str("2024-03-05 14:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
    }

    #[test]
    fn slash_dates_prefer_month_first() {
        assert_eq!(ymd("03/05/2024"), Some((2024, 3, 5)));
        assert_eq!(ymd("3/5/2024"), Some((2024, 3, 5)));
        // 13 cannot be a month, so the day-first reading is used.
        assert_eq!(ymd("13/05/2024"), Some((2024, 5, 13)));
        assert_eq!(ymd("2024/07/01"), Some((2024, 7, 1)));
        assert_eq!(ymd("05.03.2024"), Some((2024, 3, 5)));
    }

    #[test]
    fn textual_months() {
        assert_eq!(ymd("5 March 2024"), Some((2024, 3, 5)));
        assert_eq!(ymd("Mar 5, 2024"), Some((2024, 3, 5)));
        assert_eq!(ymd("march 5 2024"), Some((2024, 3, 5)));
        assert_eq!(ymd("March 2024"), Some((2024, 3, 1)));
        assert_eq!(ymd("Mar 2024"), Some((2024, 3, 1)));
        assert_eq!(ymd("march 1999"), Some((1999, 3, 1)));
        assert_eq!(ymd("December 1987"), Some((1987, 12, 1)));
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(ymd("5 March 24"), Some((2024, 3, 5)));
        assert_eq!(ymd("Mar 5, 99"), Some((1999, 3, 5)));
        assert_eq!(ymd("3/5/24"), Some((2024, 3, 5)));
    }

    #[test]
    fn partial_dates() {
        assert_eq!(ymd("20240305"), Some((2024, 3, 5)));
        assert_eq!(ymd("2024-07"), Some((2024, 7, 1)));
        assert_eq!(ymd("1987"), Some((1987, 1, 1)));
    }

    #[test]
    fn junk_is_missing() {
        for s in ["", "   ", "not a date", "null", "NaT", "2024-13-01", "2024-02-30", "12345"] {
            assert_eq!(parse_date_str(s), None, "{s:?} should not parse");
        }
    }

    #[test]
    fn non_text_cells() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date(&CellValue::DateTime(dt)), Some(dt));
        assert_eq!(parse_date(&CellValue::Integer(45000)), None);
        assert_eq!(parse_date(&CellValue::Float(45000.5)), None);
        assert_eq!(parse_date(&CellValue::Bool(true)), None);
        assert_eq!(parse_date(&CellValue::Empty), None);
    }
}
