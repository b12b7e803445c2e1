//! Conversions from spreadsheet cells to typed values.
//!
//! Exports from the warehouse system are not consistent about cell types:
//! codes arrive as numbers or text, dates as Excel serials, date cells or
//! text. These helpers normalize all of them.

use std::str::FromStr;

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%H:%M:%S%.f"];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Renders a cell as trimmed text.
///
/// Integral numbers lose their fractional part, so a storage type stored as
/// `800.0` reads as `"800"`.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => float_text(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|d| d.to_string())
            .unwrap_or_default(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

fn float_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Whether the cell holds no value or only whitespace.
pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Reads a quantity. Blank cells are `None`.
pub fn cell_decimal(cell: &Data) -> Result<Option<Decimal>, String> {
    match cell {
        _ if is_blank(cell) => Ok(None),
        Data::Int(i) => Ok(Some(Decimal::from(*i))),
        Data::Float(f) => parse_decimal(&f.to_string()).map(Some),
        Data::String(s) => parse_decimal(s).map(Some),
        other => Err(format!("expected a number, found {:?}", other)),
    }
}

/// Parses a decimal in plain or scientific notation.
pub fn parse_decimal(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("'{}' is not a number", text))
}

/// Reads a date. Blank cells are `None`.
pub fn cell_date(cell: &Data) -> Result<Option<NaiveDate>, String> {
    match cell {
        _ if is_blank(cell) => Ok(None),
        Data::DateTime(dt) => serial_date(dt.as_f64()).map(Some),
        Data::Float(f) => serial_date(*f).map(Some),
        Data::Int(i) => serial_date(*i as f64).map(Some),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s).map(Some),
        other => Err(format!("expected a date, found {:?}", other)),
    }
}

/// Reads a time of day. Blank cells are `None`.
pub fn cell_time(cell: &Data) -> Result<Option<NaiveTime>, String> {
    match cell {
        _ if is_blank(cell) => Ok(None),
        Data::DateTime(dt) => serial_time(dt.as_f64()).map(Some),
        Data::Float(f) => serial_time(*f).map(Some),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            parse_time_text(s).map(Some)
        }
        other => Err(format!("expected a time, found {:?}", other)),
    }
}

fn serial_date(serial: f64) -> Result<NaiveDate, String> {
    excel_serial_to_datetime(serial)
        .map(|dt| dt.date())
        .ok_or_else(|| format!("{} is not a valid Excel date", serial))
}

fn serial_time(serial: f64) -> Result<NaiveTime, String> {
    excel_serial_to_datetime(serial.fract())
        .map(|dt| dt.time())
        .ok_or_else(|| format!("{} is not a valid Excel time", serial))
}

/// Converts an Excel serial day number (1900 date system) to a timestamp,
/// rounded to the nearest second.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round();
    if seconds > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::try_seconds(seconds as i64)?)
}

fn parse_date_text(text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| format!("'{}' is not a recognized date", text))
}

fn parse_time_text(text: &str) -> Result<NaiveTime, String> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.time())
        })
        .ok_or_else(|| format!("'{}' is not a recognized time", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_integral_floats_render_as_codes() {
        assert_eq!(cell_text(&Data::Float(800.0)), "800");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_text(&Data::Int(4711)), "4711");
        assert_eq!(cell_text(&text("  UNLOAD01 ")), "UNLOAD01");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_decimal_from_cells() {
        assert_eq!(cell_decimal(&Data::Float(12.0)).unwrap(), Some(Decimal::new(12, 0)));
        assert_eq!(cell_decimal(&Data::Float(0.1)).unwrap(), Some(Decimal::new(1, 1)));
        assert_eq!(cell_decimal(&Data::Int(7)).unwrap(), Some(Decimal::new(7, 0)));
        assert_eq!(cell_decimal(&text("3.50")).unwrap(), Some(Decimal::new(350, 2)));
        assert_eq!(cell_decimal(&text(" ")).unwrap(), None);
        assert!(cell_decimal(&text("three")).is_err());
        assert!(cell_decimal(&Data::Bool(true)).is_err());
    }

    #[test]
    fn test_excel_serial_conversion() {
        // 45995 is 2025-12-04 in the 1900 date system
        let dt = excel_serial_to_datetime(45995.5).unwrap();
        assert_eq!(dt.to_string(), "2025-12-04 12:00:00");
        assert!(excel_serial_to_datetime(-1.0).is_none());
        assert!(excel_serial_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_dates_from_cells() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(cell_date(&text("2026-01-12")).unwrap(), Some(expected));
        assert_eq!(cell_date(&text("01/12/2026")).unwrap(), Some(expected));
        assert_eq!(cell_date(&text("12.01.2026")).unwrap(), Some(expected));
        assert_eq!(cell_date(&text("2026-01-12 00:00:00")).unwrap(), Some(expected));
        assert_eq!(cell_date(&Data::Float(46034.0)).unwrap(), Some(expected));
        assert_eq!(cell_date(&Data::Empty).unwrap(), None);
        assert!(cell_date(&text("soon")).is_err());
    }

    #[test]
    fn test_times_from_cells() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(cell_time(&text("14:30:00")).unwrap(), Some(expected));
        assert_eq!(cell_time(&text("14:30")).unwrap(), Some(expected));
        // 14:30 is 0.604166... of a day
        assert_eq!(cell_time(&Data::Float(14.5 / 24.0)).unwrap(), Some(expected));
        assert_eq!(cell_time(&Data::Empty).unwrap(), None);
        assert!(cell_time(&text("afternoon")).is_err());
    }
}
