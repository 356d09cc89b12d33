//! Normalises evaluated signal-formula text into trade signals.

use serde::{Deserialize, Serialize};
use sheetback_common::Coordinate;

use crate::error::AdapterError;

/// Trade signal for one aligned row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Hold,
    Long,
    LongEntry,
    LongExit,
    Short,
    ShortEntry,
    ShortExit,
}

impl Signal {
    /// Total mapping from evaluated formula text: blank, `None`, and
    /// unrecognised text all resolve to `Hold`. Compound names accept both
    /// underscore and space separators, case-insensitively.
    pub fn from_text(text: Option<&str>) -> Signal {
        let Some(text) = text else {
            return Signal::Hold;
        };
        match text.trim().to_lowercase().as_str() {
            "long" => Signal::Long,
            "long_entry" | "long entry" => Signal::LongEntry,
            "long_exit" | "long exit" => Signal::LongExit,
            "short" => Signal::Short,
            "short_entry" | "short entry" => Signal::ShortEntry,
            "short_exit" | "short exit" => Signal::ShortExit,
            _ => Signal::Hold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Hold => "hold",
            Signal::Long => "long",
            Signal::LongEntry => "long_entry",
            Signal::LongExit => "long_exit",
            Signal::Short => "short",
            Signal::ShortEntry => "short_entry",
            Signal::ShortExit => "short_exit",
        }
    }
}

/// Range reference handed to the formula evaluator for the signal column:
/// one cell per aligned row, starting one row below the anchor.
pub fn signal_range(sheet: &str, anchor: &Coordinate, data_length: usize) -> String {
    let column = anchor.column();
    let start = anchor.row() + 1;
    let end = anchor.row() + data_length as u32;
    format!("{sheet}!{column}{start}:{column}{end}")
}

/// Translate the evaluated results, enforcing that the evaluator returned
/// exactly one result per aligned row.
pub fn translate(
    results: &[Option<String>],
    data_length: usize,
) -> Result<Vec<Signal>, AdapterError> {
    if results.len() != data_length {
        return Err(AdapterError::SignalLengthMismatch {
            expected: data_length,
            actual: results.len(),
        });
    }
    Ok(results
        .iter()
        .map(|result| Signal::from_text(result.as_deref()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translator_is_total() {
        assert_eq!(Signal::from_text(None), Signal::Hold);
        assert_eq!(Signal::from_text(Some("")), Signal::Hold);
        assert_eq!(Signal::from_text(Some("garbage")), Signal::Hold);
        assert_eq!(Signal::from_text(Some("long")), Signal::Long);
        assert_eq!(Signal::from_text(Some(" Long Entry ")), Signal::LongEntry);
        assert_eq!(Signal::from_text(Some("LONG_EXIT")), Signal::LongExit);
        assert_eq!(Signal::from_text(Some("short")), Signal::Short);
        assert_eq!(Signal::from_text(Some("short entry")), Signal::ShortEntry);
        assert_eq!(Signal::from_text(Some("short_exit")), Signal::ShortExit);
    }

    #[test]
    fn range_starts_one_row_below_the_anchor() {
        let anchor = Coordinate::parse("H1").unwrap();
        assert_eq!(signal_range("btc_1d", &anchor, 94), "btc_1d!H2:H95");
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let results = vec![Some("long".to_string()); 3];
        match translate(&results, 4) {
            Err(AdapterError::SignalLengthMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (4, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
