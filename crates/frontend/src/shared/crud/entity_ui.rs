use contracts::domain::common::Reactivatable;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// How a record is shown by the generic list page.
pub trait EntityUi: Reactivatable {
    /// Name for [`crate::shared::icons::icon`]
    fn icon() -> &'static str;

    /// Table headers, without the actions column
    fn columns() -> Vec<&'static str>;

    /// One string per entry of [`EntityUi::columns`]
    fn cells(&self) -> Vec<String>;

    /// Secondary lines on the card, under the name
    fn card_lines(&self) -> Vec<(&'static str, String)>;

    /// Rows of the view dialog
    fn details(&self) -> Vec<(&'static str, String)>;

    /// Color stripe on the card
    fn accent_color(&self) -> Option<String> {
        None
    }

    fn form_fields(form: RwSignal<Self::Form>, errors: RwSignal<FieldErrors>) -> AnyView;
}

/// Shorthand for `Option<String>` cells.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some(" RH ")), "RH");
    }
}
