//! Worksheet coordinates in A1 form (column letters + 1-based row).
//!
//! `Coordinate` keeps the column as its textual label rather than a numeric
//! index because the adapter's whole job is coordinate arithmetic against
//! the addresses a worksheet author sees. Conversions to and from the
//! 0-based column index are exposed for backends that store cells numerically.

use core::fmt;
use std::error::Error;

/// Errors returned when parsing a textual A1 coordinate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoordParseError {
    /// No digit anywhere in the input, so there is no row to split at.
    MissingRow { input: String },
    /// The part before the first digit is empty or not all `A`-`Z`.
    BadColumn { input: String },
    /// The digits did not form a positive row number.
    BadRow { input: String },
}

impl CoordParseError {
    /// The offending input text.
    pub fn input(&self) -> &str {
        match self {
            CoordParseError::MissingRow { input }
            | CoordParseError::BadColumn { input }
            | CoordParseError::BadRow { input } => input,
        }
    }

    /// Short machine-independent description of what went wrong.
    pub fn reason(&self) -> &'static str {
        match self {
            CoordParseError::MissingRow { .. } => "no row digits",
            CoordParseError::BadColumn { .. } => "column label is not A-Z letters",
            CoordParseError::BadRow { .. } => "row is not a positive integer",
        }
    }
}

impl fmt::Display for CoordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in `{}`", self.reason(), self.input())
    }
}

impl Error for CoordParseError {}

/// The four relative positions a value cell can occupy around a tag cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute cell position: column letters plus a 1-based row.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    column: String,
    row: u32,
}

impl Coordinate {
    /// Construct from a column label and 1-based row.
    ///
    /// The label is taken as-is; use [`Coordinate::parse`] for untrusted text.
    pub fn new(column: impl Into<String>, row: u32) -> Self {
        Coordinate {
            column: column.into(),
            row,
        }
    }

    /// Parse an A1 reference by splitting at its first digit.
    pub fn parse(text: &str) -> Result<Self, CoordParseError> {
        let split = text
            .find(|ch: char| ch.is_ascii_digit())
            .ok_or_else(|| CoordParseError::MissingRow {
                input: text.to_string(),
            })?;
        let (column, digits) = text.split_at(split);
        if column.is_empty() || !column.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(CoordParseError::BadColumn {
                input: text.to_string(),
            });
        }
        let row: u32 = digits.parse().map_err(|_| CoordParseError::BadRow {
            input: text.to_string(),
        })?;
        if row == 0 {
            return Err(CoordParseError::BadRow {
                input: text.to_string(),
            });
        }
        Ok(Coordinate {
            column: column.to_string(),
            row,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// 0-based column index, if the label is a valid letter sequence.
    pub fn column_index(&self) -> Option<u32> {
        letters_to_column_index(&self.column)
    }

    /// Same column, different row.
    pub fn with_row(&self, row: u32) -> Coordinate {
        Coordinate {
            column: self.column.clone(),
            row,
        }
    }

    /// The neighbouring cell in the given direction, or `None` when the step
    /// would leave the grid (above row 1, left of column `A`).
    ///
    /// Left/right stepping goes through the base-26 column index, so it is
    /// exact for multi-letter labels as well (`Z` → `AA`). Legacy sheets only
    /// exercise single-letter columns; tests pin that behaviour.
    pub fn offset(&self, direction: Direction) -> Option<Coordinate> {
        match direction {
            Direction::Top => {
                let row = self.row.checked_sub(1)?;
                (row >= 1).then(|| self.with_row(row))
            }
            Direction::Bottom => Some(self.with_row(self.row + 1)),
            Direction::Left => {
                let idx = letters_to_column_index(&self.column)?.checked_sub(1)?;
                Some(Coordinate {
                    column: column_to_letters(idx),
                    row: self.row,
                })
            }
            Direction::Right => {
                let idx = letters_to_column_index(&self.column)? + 1;
                Some(Coordinate {
                    column: column_to_letters(idx),
                    row: self.row,
                })
            }
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Coordinate::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Render a 0-based column index as its letter label (`0` → `A`, `27` → `AB`).
pub fn column_to_letters(mut col: u32) -> String {
    let mut buf = Vec::new();
    loop {
        let rem = (col % 26) as u8;
        buf.push(b'A' + rem);
        col /= 26;
        if col == 0 {
            break;
        }
        col -= 1;
    }
    buf.reverse();
    String::from_utf8(buf).expect("only ASCII A-Z")
}

/// Parse a letter label back into its 0-based column index.
pub fn letters_to_column_index(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for (idx, ch) in s.bytes().enumerate() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        let val = (ch - b'A') as u32;
        col = col.checked_mul(26)?;
        col = col.checked_add(val)?;
        if idx != s.len() - 1 {
            col = col.checked_add(1)?;
        }
    }
    Some(col)
}
