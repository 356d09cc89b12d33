//! Cell values as a worksheet hands them to the adapter.

use chrono::{NaiveDate, NaiveDateTime};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single worksheet cell value.
///
/// This is the narrow slice of spreadsheet typing the adapter actually
/// consumes: numbers and numeric text feed the data series, text carries the
/// embedded markers, and date/datetime cells become epoch seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Textual content, for marker scanning. Only `Text` cells can carry
    /// markers; numeric cells never match a marker substring.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric reading of the cell: ints and floats directly, booleans as
    /// 0/1, text through a float parse. Dates are not numbers here; use
    /// [`CellValue::as_epoch_seconds`] for those.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(t) => t.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Unix epoch seconds for date and datetime cells, treating the naive
    /// timestamp as UTC.
    pub fn as_epoch_seconds(&self) -> Option<f64> {
        match self {
            CellValue::Date(d) => {
                let dt = d.and_hms_opt(0, 0, 0)?;
                Some(dt.and_utc().timestamp() as f64)
            }
            CellValue::DateTime(dt) => {
                Some(dt.and_utc().timestamp_millis() as f64 / 1_000.0)
            }
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::DateTime(dt) => write!(f, "{dt}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numeric_readings() {
        assert_eq!(CellValue::Int(3).as_number(), Some(3.0));
        assert_eq!(CellValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Text(" 42.5 ".into()).as_number(), Some(42.5));
        assert_eq!(CellValue::Text("n/a".into()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn dates_convert_to_epoch_seconds() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(CellValue::Date(date).as_epoch_seconds(), Some(1_609_459_200.0));

        let dt = date.and_hms_opt(6, 30, 0).unwrap();
        assert_eq!(
            CellValue::DateTime(dt).as_epoch_seconds(),
            Some(1_609_482_600.0)
        );
        assert_eq!(CellValue::Number(5.0).as_epoch_seconds(), None);
    }

    #[test]
    fn only_text_cells_expose_text() {
        assert_eq!(CellValue::Text("<data::close>".into()).as_text(), Some("<data::close>"));
        assert_eq!(CellValue::Number(1.0).as_text(), None);
    }
}
