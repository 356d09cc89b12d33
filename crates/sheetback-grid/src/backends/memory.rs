//! In-memory worksheet backend.
//!
//! Holds cells in sparse `(row, column-index)` maps per sheet. This is the
//! backend unit tests drive, and the reference implementation of the
//! [`SheetReader`] / [`UpdateSink`] contracts for real backends to mirror.

use std::collections::BTreeMap;

use sheetback_common::{CellValue, Coordinate};

use crate::error::GridError;
use crate::traits::{SheetReader, UpdateMap, UpdateSink};

#[derive(Debug, Default, Clone)]
struct MemorySheet {
    /// Sparse cells keyed by (1-based row, 0-based column index).
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl MemorySheet {
    fn dimensions(&self) -> (u32, u32) {
        let mut max_row = 0;
        let mut max_col = 0;
        for (row, col) in self.cells.keys() {
            max_row = max_row.max(*row);
            max_col = max_col.max(col + 1);
        }
        (max_row, max_col)
    }
}

/// Workbook held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryGrid {
    sheets: BTreeMap<String, MemorySheet>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: impl Into<String>) {
        self.sheets.entry(name.into()).or_default();
    }

    /// Write a value, dropping `Empty` back to an unset cell.
    pub fn set_value(
        &mut self,
        sheet: &str,
        coordinate: &Coordinate,
        value: CellValue,
    ) -> Result<(), GridError> {
        let key = cell_key(coordinate)?;
        let sheet = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| GridError::UnknownSheet(sheet.to_string()))?;
        if value.is_empty() {
            sheet.cells.remove(&key);
        } else {
            sheet.cells.insert(key, value);
        }
        Ok(())
    }
}

fn cell_key(coordinate: &Coordinate) -> Result<(u32, u32), GridError> {
    let col = coordinate.column_index().ok_or_else(|| {
        GridError::Backend(format!("unusable column label in `{coordinate}`"))
    })?;
    Ok((coordinate.row(), col))
}

impl SheetReader for MemoryGrid {
    fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    fn dimensions(&self, sheet: &str) -> Result<(u32, u32), GridError> {
        self.sheets
            .get(sheet)
            .map(MemorySheet::dimensions)
            .ok_or_else(|| GridError::UnknownSheet(sheet.to_string()))
    }

    fn cell(&self, sheet: &str, coordinate: &Coordinate) -> Result<CellValue, GridError> {
        let stored = self
            .sheets
            .get(sheet)
            .ok_or_else(|| GridError::UnknownSheet(sheet.to_string()))?
            .cells
            .get(&cell_key(coordinate)?);
        Ok(stored.cloned().unwrap_or(CellValue::Empty))
    }
}

impl UpdateSink for MemoryGrid {
    fn apply(&mut self, sheet: &str, updates: &UpdateMap) -> Result<(), GridError> {
        for (coordinate, value) in updates {
            self.set_value(sheet, coordinate, value.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(text: &str) -> Coordinate {
        Coordinate::parse(text).unwrap()
    }

    #[test]
    fn unwritten_cells_read_empty() {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("data");
        grid.set_value("data", &coord("B2"), CellValue::Number(1.5))
            .unwrap();

        assert_eq!(grid.cell("data", &coord("B2")).unwrap(), CellValue::Number(1.5));
        assert_eq!(grid.cell("data", &coord("A1")).unwrap(), CellValue::Empty);
        assert!(matches!(
            grid.cell("other", &coord("A1")),
            Err(GridError::UnknownSheet(_))
        ));
    }

    #[test]
    fn dimensions_track_populated_area() {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("data");
        assert_eq!(grid.dimensions("data").unwrap(), (0, 0));

        grid.set_value("data", &coord("C7"), CellValue::Int(1)).unwrap();
        grid.set_value("data", &coord("A2"), CellValue::Int(1)).unwrap();
        assert_eq!(grid.dimensions("data").unwrap(), (7, 3));
    }

    #[test]
    fn apply_writes_the_whole_batch() {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("data");

        let mut updates = UpdateMap::new();
        updates.insert(coord("A1"), CellValue::Number(10.0));
        updates.insert(coord("B3"), CellValue::Text("done".into()));
        grid.apply("data", &updates).unwrap();

        assert_eq!(grid.cell("data", &coord("A1")).unwrap(), CellValue::Number(10.0));
        assert_eq!(
            grid.cell("data", &coord("B3")).unwrap(),
            CellValue::Text("done".into())
        );
    }
}
