use sheetback_common::{CoordParseError, Coordinate, Direction};
use sheetback_grid::GridError;
use thiserror::Error;

use crate::tags::Tag;

/// Failures surfaced by the adapter. All are fatal to the current load:
/// nothing is retried and no partial write-back ever happens, because the
/// update map is only built after every upstream step has succeeded.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("malformed coordinate `{text}`: {reason}")]
    MalformedCoordinate { text: String, reason: String },

    #[error("required column {tag} was not found in the worksheet")]
    MissingRequiredColumn { tag: Tag },

    #[error("cell {coordinate} for column {tag} does not hold a usable numeric value")]
    InvalidCellValue { tag: Tag, coordinate: Coordinate },

    #[error("evaluated signal range length {actual} does not match data length {expected}")]
    SignalLengthMismatch { expected: usize, actual: usize },

    #[error("no worksheet has been loaded")]
    NotLoaded,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("formula evaluation failed: {message}")]
    Evaluation { message: String },

    #[error("backtest engine failed: {message}")]
    Engine { message: String },
}

impl AdapterError {
    /// A directional step fell off the grid (above row 1, left of column A).
    pub(crate) fn off_grid(coordinate: &Coordinate, direction: Direction) -> Self {
        AdapterError::MalformedCoordinate {
            text: coordinate.to_string(),
            reason: format!("no cell in direction `{direction}`"),
        }
    }
}

impl From<CoordParseError> for AdapterError {
    fn from(err: CoordParseError) -> Self {
        AdapterError::MalformedCoordinate {
            text: err.input().to_string(),
            reason: err.reason().to_string(),
        }
    }
}
