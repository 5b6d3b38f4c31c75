//! Utilities for date and time formatting
//!
//! Everything user-facing is pt-BR: `DD/MM/YYYY` and `DD/MM/YYYY HH:MM`.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Format ISO datetime string to DD/MM/YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time: String = time_part.chars().take(5).collect();
                return format!("{}/{}/{} {}", day, month, year, time);
            }
        }
    }
    datetime_str.to_string()
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_naive_datetime(dt: NaiveDateTime) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

/// "-" for missing values
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_naive_date)
        .unwrap_or_else(|| "-".to_string())
}

/// `<input type="date">` value
pub fn to_input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today in the browser's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_naive_formats() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_naive_datetime(dt), "10/06/2024 09:05");
        assert_eq!(format_time(dt), "09:05");
        assert_eq!(format_optional_date(None), "-");
        assert_eq!(to_input_date(dt.date()), "2024-06-10");
    }
}
