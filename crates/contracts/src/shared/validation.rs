//! Reusable form rules. Messages are user-facing (pt-BR).

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Inline errors keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error; the first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if is_blank(value) {
        errors.add(field, message);
    }
}

/// Empty or whitespace-only input becomes `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive, whitespace-trimmed comparison against existing names.
pub fn is_name_taken<'a>(name: &str, mut siblings: impl Iterator<Item = &'a str>) -> bool {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    siblings.any(|other| other.trim().to_lowercase() == wanted)
}

/// Person names need at least a first name and a surname.
pub fn has_full_name(name: &str) -> bool {
    name.split_whitespace().count() >= 2
}

/// Parses `YYYY-MM-DD` as produced by `<input type="date">`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses `YYYY-MM-DDTHH:MM[:SS]` as produced by `<input type="datetime-local">`.
pub fn parse_datetime_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

/// Whole years lived on `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth).unwrap_or(0)
}

/// Checks a required date field that must not lie in the future.
pub fn past_date(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    today: NaiveDate,
    label: &str,
) -> Option<NaiveDate> {
    if is_blank(value) {
        errors.add(field, format!("{label} é obrigatória"));
        return None;
    }
    match parse_date(value) {
        Some(date) if is_future(date, today) => {
            errors.add(field, format!("{label} não pode ser futura"));
            None
        }
        Some(date) => Some(date),
        None => {
            errors.add(field, format!("{label} inválida"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("nome", "primeiro");
        errors.add("nome", "segundo");
        assert_eq!(errors.get("nome"), Some("primeiro"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_name_taken_is_case_insensitive() {
        let names = ["Financeiro", "  Vendas "];
        assert!(is_name_taken("financeiro", names.iter().copied()));
        assert!(is_name_taken("VENDAS", names.iter().copied()));
        assert!(!is_name_taken("Compras", names.iter().copied()));
        assert!(!is_name_taken("   ", names.iter().copied()));
    }

    #[test]
    fn test_full_name() {
        assert!(has_full_name("Maria Silva"));
        assert!(has_full_name("  Ana   de Souza "));
        assert!(!has_full_name("Maria"));
        assert!(!has_full_name("   "));
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(d("2000-06-15"), d("2018-06-14")), 17);
        assert_eq!(age_on(d("2000-06-15"), d("2018-06-15")), 18);
        assert_eq!(age_on(d("2030-01-01"), d("2018-06-15")), 0);
    }

    #[test]
    fn test_past_date_rules() {
        let today = d("2024-06-10");
        let mut errors = FieldErrors::new();
        assert_eq!(
            past_date(&mut errors, "data", "2024-06-10", today, "Data"),
            Some(today)
        );
        assert!(errors.is_empty());

        assert_eq!(past_date(&mut errors, "data", "2024-06-11", today, "Data"), None);
        assert_eq!(errors.get("data"), Some("Data não pode ser futura"));

        let mut errors = FieldErrors::new();
        past_date(&mut errors, "data", "10/06/2024", today, "Data");
        assert_eq!(errors.get("data"), Some("Data inválida"));
    }

    #[test]
    fn test_parse_datetime_local() {
        assert!(parse_datetime_local("2024-06-10T09:00").is_some());
        assert!(parse_datetime_local("2024-06-10T09:00:30").is_some());
        assert!(parse_datetime_local("2024-06-10").is_none());
    }
}
