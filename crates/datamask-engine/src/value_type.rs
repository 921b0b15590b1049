use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use datamask_core::{Cell, Number};

/// Date string formats accepted for text cells, tried in order.
pub const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];

/// Value type of a cell as seen by the masking strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Empty,
    Text(String),
    Number(Number),
    Date(NaiveDate),
}

/// Classify a raw cell.
///
/// Numbers are only numbers when the source already typed them; digit
/// strings stay text here regardless of their length.
pub fn classify_value(cell: &Cell) -> ValueKind {
    match cell {
        Cell::Empty => ValueKind::Empty,
        Cell::Number(value) => ValueKind::Number(*value),
        Cell::Date(value) => ValueKind::Date(*value),
        Cell::Text(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                ValueKind::Empty
            } else if let Some(date) = parse_date(text) {
                ValueKind::Date(date)
            } else {
                ValueKind::Text(text.to_string())
            }
        }
    }
}

/// Parse `text` with the first matching entry of [`DATE_FORMATS`].
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// True for strings written in one of the [`DATE_FORMATS`] layouts
/// (`d/m/yyyy` or `yyyy-m-d`) whether or not they name a real calendar day.
pub fn looks_like_date(text: &str) -> bool {
    date_shape().is_some_and(|re| re.is_match(text.trim()))
}

fn date_shape() -> Option<&'static Regex> {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(r"^(?:\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{1,2}-\d{1,2})$").ok())
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    #[test]
    fn day_first_format_wins() {
        assert_eq!(
            classify_value(&Cell::from("03/04/2020")),
            ValueKind::Date(date(2020, 4, 3))
        );
    }

    #[test]
    fn iso_dates_are_accepted() {
        assert_eq!(
            classify_value(&Cell::from(" 1990-12-31 ")),
            ValueKind::Date(date(1990, 12, 31))
        );
    }

    #[test]
    fn impossible_dates_stay_text() {
        assert_eq!(
            classify_value(&Cell::from("31/02/2020")),
            ValueKind::Text("31/02/2020".to_string())
        );
        assert!(looks_like_date("31/02/2020"));
        assert!(looks_like_date("2021-13-40"));
        assert!(!looks_like_date("hello world"));
        assert!(!looks_like_date("123-45"));
    }

    #[test]
    fn digit_groups_outside_date_layouts_are_not_dates() {
        assert!(!looks_like_date("012-345-6789"));
        assert!(!looks_like_date("1234-5678-9012"));
        assert!(!looks_like_date("12/34/56"));
        assert!(!looks_like_date("2020/01/01"));
        assert!(!looks_like_date("01-02-2020"));
    }

    #[test]
    fn long_digit_strings_are_not_numbers() {
        assert_eq!(
            classify_value(&Cell::from("0123456789")),
            ValueKind::Text("0123456789".to_string())
        );
    }

    #[test]
    fn text_is_trimmed_and_blank_is_empty() {
        assert_eq!(
            classify_value(&Cell::from("  Kuala Lumpur ")),
            ValueKind::Text("Kuala Lumpur".to_string())
        );
        assert_eq!(classify_value(&Cell::from("   ")), ValueKind::Empty);
        assert_eq!(classify_value(&Cell::Empty), ValueKind::Empty);
    }

    #[test]
    fn typed_values_pass_through() {
        assert_eq!(
            classify_value(&Cell::from(42_i64)),
            ValueKind::Number(Number::Int(42))
        );
        assert_eq!(
            classify_value(&Cell::Date(date(2001, 1, 1))),
            ValueKind::Date(date(2001, 1, 1))
        );
    }
}
