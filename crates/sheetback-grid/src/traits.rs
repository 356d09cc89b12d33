//! Seams between the adapter and whatever actually holds the worksheet.

use std::collections::BTreeMap;

use sheetback_common::{CellValue, Coordinate};

use crate::error::GridError;

/// The final coordinate-to-value batch a computation produces. `BTreeMap`
/// keeps write order deterministic; a later insert for the same coordinate
/// overwrites the earlier one.
pub type UpdateMap = BTreeMap<Coordinate, CellValue>;

/// Read-only access to a loaded workbook's cells.
pub trait SheetReader {
    fn has_sheet(&self, name: &str) -> bool;

    /// Bounding box of the sheet's populated area as `(max_row, max_col)`,
    /// both 1-based counts. `(0, 0)` for an empty sheet.
    fn dimensions(&self, sheet: &str) -> Result<(u32, u32), GridError>;

    /// Value at a coordinate. Cells inside the bounding box that were never
    /// written read back as [`CellValue::Empty`].
    fn cell(&self, sheet: &str, coordinate: &Coordinate) -> Result<CellValue, GridError>;
}

/// Write-back sink applying one computed batch per load.
pub trait UpdateSink {
    fn apply(&mut self, sheet: &str, updates: &UpdateMap) -> Result<(), GridError>;
}
