use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display format used whenever a date cell is rendered back to text.
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Digit count from which an integer-looking string is kept as text.
const ID_LIKE_DIGITS: usize = 10;

/// Numeric cell payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

/// A single table value as produced by a table reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Cell {
    Empty,
    Text(String),
    Number(Number),
    Date(NaiveDate),
}

impl Cell {
    /// Types a raw textual field the way a CSV source is interpreted.
    ///
    /// Integer-looking strings with a leading zero or with at least ten digits
    /// stay `Text` so zero-padded identifiers and phone numbers keep their
    /// exact spelling.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }

        if is_integer_literal(trimmed) {
            if is_id_like(trimmed) {
                return Cell::Text(raw.to_string());
            }
            if let Ok(value) = trimmed.parse::<i64>() {
                return Cell::Number(Number::Int(value));
            }
            return Cell::Text(raw.to_string());
        }

        if trimmed.contains('.')
            && !trimmed.contains(char::is_alphabetic)
            && let Ok(value) = trimmed.parse::<f64>()
            && value.is_finite()
        {
            return Cell::Number(Number::Float(value));
        }

        Cell::Text(raw.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Renders the cell as a CSV field.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Date(value) => value.format(DATE_DISPLAY_FORMAT).to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(Number::Int(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(Number::Float(value))
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

/// A named column with its values in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// An in-memory table: ordered columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from a header row and row-major records.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate column name: {header}"
                )));
            }
        }

        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::InvalidTable(format!(
                    "row {} has {} field(s), expected {}",
                    row_index + 1,
                    row.len(),
                    columns.len()
                )));
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.values.push(cell);
            }
        }

        Ok(Self { columns })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|column| column.values.len())
            .unwrap_or(0)
    }

    /// Iterates rows as borrowed cells, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count()).map(move |row_index| {
            self.columns
                .iter()
                .map(|column| &column.values[row_index])
                .collect()
        })
    }
}

fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit())
}

fn is_id_like(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    (digits.len() > 1 && digits.starts_with('0')) || digits.len() >= ID_LIKE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_integers_become_numbers() {
        assert_eq!(Cell::from_raw("5000"), Cell::Number(Number::Int(5000)));
        assert_eq!(Cell::from_raw(" -42 "), Cell::Number(Number::Int(-42)));
        assert_eq!(Cell::from_raw("0"), Cell::Number(Number::Int(0)));
    }

    #[test]
    fn id_like_digit_strings_stay_text() {
        assert_eq!(Cell::from_raw("0123456789"), Cell::from("0123456789"));
        assert_eq!(Cell::from_raw("9001011234"), Cell::from("9001011234"));
        assert_eq!(Cell::from_raw("007"), Cell::from("007"));
    }

    #[test]
    fn raw_floats_and_text() {
        assert_eq!(Cell::from_raw("12.5"), Cell::Number(Number::Float(12.5)));
        assert_eq!(Cell::from_raw("1.2.3"), Cell::from("1.2.3"));
        assert_eq!(Cell::from_raw("NaN."), Cell::from("NaN."));
        assert_eq!(Cell::from_raw("   "), Cell::Empty);
        assert_eq!(Cell::from_raw("12/01/1990"), Cell::from("12/01/1990"));
    }

    #[test]
    fn renders_fields() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 12).unwrap_or_default();
        assert_eq!(Cell::Date(date).to_field(), "12/01/1990");
        assert_eq!(Cell::from(3.0_f64).to_field(), "3.0");
        assert_eq!(Cell::from(2.25_f64).to_field(), "2.25");
        assert_eq!(Cell::Empty.to_field(), "");
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Cell::from(1_i64), Cell::from(2_i64)],
                vec![Cell::from(3_i64)],
            ],
        );
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn rejects_duplicate_headers() {
        let result = Table::from_rows(vec!["a".to_string(), "a".to_string()], Vec::new());
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn builds_columns_in_row_order() {
        let table = Table::from_rows(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Cell::from(1_i64), Cell::from("Ana")],
                vec![Cell::from(2_i64), Cell::from("Bruno")],
            ],
        )
        .expect("valid table");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["id", "name"]);
        let names = table.column("name").expect("name column");
        assert_eq!(names.values, vec![Cell::from("Ana"), Cell::from("Bruno")]);
        let rows: Vec<Vec<&Cell>> = table.rows().collect();
        assert_eq!(rows[1], vec![&Cell::from(2_i64), &Cell::from("Bruno")]);
    }
}
