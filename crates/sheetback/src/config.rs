//! Resolves directional configuration cells into a typed config record.

use serde::{Deserialize, Serialize};
use sheetback_common::{CellValue, Coordinate};
use sheetback_grid::SheetReader;

use crate::error::AdapterError;
use crate::scan::AnchorMap;
use crate::tags::{self, Tag};

/// Backtest run parameters. Every field has a hard default, overridable
/// independently when its config tag and a non-empty value cell exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub on_bar_close: bool,
    pub initial_capital: f64,
    pub buy_with_equity: bool,
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            on_bar_close: false,
            initial_capital: 1000.0,
            buy_with_equity: false,
            risk_free_rate: 0.0,
        }
    }
}

/// Resolve all four config tags against the worksheet, starting from the
/// hard defaults. A tag absent from the anchor map, or present with an empty
/// value cell, leaves its default untouched.
pub fn resolve_config<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
) -> Result<BacktestConfig, AdapterError> {
    let mut config = BacktestConfig::default();

    if let Some(value) = truthy_override(reader, sheet, anchors, tags::CONFIG_ON_BAR_CLOSE)? {
        config.on_bar_close = value;
    }
    if let Some(value) = numeric_override(reader, sheet, anchors, tags::CONFIG_INITIAL_CAPITAL)? {
        config.initial_capital = value;
    }
    if let Some(value) = truthy_override(reader, sheet, anchors, tags::CONFIG_BUY_WITH_EQUITY)? {
        config.buy_with_equity = value;
    }
    if let Some(value) = numeric_override(reader, sheet, anchors, tags::CONFIG_RISK_FREE_RATE)? {
        config.risk_free_rate = value;
    }

    tracing::debug!(sheet, ?config, "config resolved");
    Ok(config)
}

/// Locate and read a config tag's value cell: read the tag cell's own text,
/// take its embedded position marker (default bottom), step one cell in that
/// direction. `Ok(None)` when the tag is not anchored or the value cell is
/// empty.
fn resolved_cell<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
    tag: Tag,
) -> Result<Option<(Coordinate, CellValue)>, AdapterError> {
    let Some(anchor) = anchors.get(&tag) else {
        return Ok(None);
    };
    let label = reader.cell(sheet, anchor)?;
    let direction = tags::embedded_position(label.as_text().unwrap_or(""));
    let target = anchor
        .offset(direction)
        .ok_or_else(|| AdapterError::off_grid(anchor, direction))?;
    let value = reader.cell(sheet, &target)?;
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some((target, value)))
}

/// Boolean-style config cell: truthy iff the value numerically equals 1.
fn truthy_override<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
    tag: Tag,
) -> Result<Option<bool>, AdapterError> {
    Ok(resolved_cell(reader, sheet, anchors, tag)?
        .map(|(_, value)| value.as_number() == Some(1.0)))
}

/// Numeric config cell. Out-of-range numbers are accepted as-is; a non-empty
/// cell that does not read as a number is an error.
fn numeric_override<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
    tag: Tag,
) -> Result<Option<f64>, AdapterError> {
    match resolved_cell(reader, sheet, anchors, tag)? {
        None => Ok(None),
        Some((coordinate, value)) => match value.as_number() {
            Some(number) => Ok(Some(number)),
            None => Err(AdapterError::InvalidCellValue { tag, coordinate }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetback_grid::MemoryGrid;

    fn coord(text: &str) -> Coordinate {
        Coordinate::parse(text).unwrap()
    }

    fn grid_with_tag(label: &str, at: &str) -> (MemoryGrid, AnchorMap) {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("s");
        grid.set_value("s", &coord(at), CellValue::Text(label.into()))
            .unwrap();
        let mut anchors = AnchorMap::new();
        anchors.insert(tags::CONFIG_INITIAL_CAPITAL, coord(at));
        (grid, anchors)
    }

    #[test]
    fn right_marker_reads_the_cell_to_the_right() {
        let (mut grid, anchors) =
            grid_with_tag("<config::initial_capital> <target::right>", "B2");
        grid.set_value("s", &coord("C2"), CellValue::Int(2500)).unwrap();

        let config = resolve_config(&grid, "s", &anchors).unwrap();
        assert_eq!(config.initial_capital, 2500.0);
    }

    #[test]
    fn default_direction_is_bottom() {
        let (mut grid, anchors) = grid_with_tag("<config::initial_capital>", "B2");
        grid.set_value("s", &coord("B3"), CellValue::Number(750.0))
            .unwrap();

        let config = resolve_config(&grid, "s", &anchors).unwrap();
        assert_eq!(config.initial_capital, 750.0);
    }

    #[test]
    fn absent_tag_or_empty_value_keeps_hard_defaults() {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("s");
        let config = resolve_config(&grid, "s", &AnchorMap::new()).unwrap();
        assert_eq!(config, BacktestConfig::default());
        assert_eq!(config.initial_capital, 1000.0);

        // Tag anchored but the resolved cell is empty.
        let (grid, anchors) = grid_with_tag("<config::initial_capital>", "B2");
        let config = resolve_config(&grid, "s", &anchors).unwrap();
        assert_eq!(config.initial_capital, 1000.0);
    }

    #[test]
    fn truthy_fields_compare_against_one() {
        let mut grid = MemoryGrid::new();
        grid.add_sheet("s");
        grid.set_value("s", &coord("A1"), CellValue::Text("<config::on_bar_close>".into()))
            .unwrap();
        grid.set_value("s", &coord("A2"), CellValue::Int(1)).unwrap();
        grid.set_value("s", &coord("D1"), CellValue::Text("<config::buy_with_equity>".into()))
            .unwrap();
        grid.set_value("s", &coord("D2"), CellValue::Text("yes".into()))
            .unwrap();

        let mut anchors = AnchorMap::new();
        anchors.insert(tags::CONFIG_ON_BAR_CLOSE, coord("A1"));
        anchors.insert(tags::CONFIG_BUY_WITH_EQUITY, coord("D1"));

        let config = resolve_config(&grid, "s", &anchors).unwrap();
        assert!(config.on_bar_close);
        // Non-numeric text is not "1", so it resolves falsy.
        assert!(!config.buy_with_equity);
    }

    #[test]
    fn non_numeric_numeric_field_is_an_error() {
        let (mut grid, anchors) = grid_with_tag("<config::initial_capital>", "B2");
        grid.set_value("s", &coord("B3"), CellValue::Text("lots".into()))
            .unwrap();

        match resolve_config(&grid, "s", &anchors) {
            Err(AdapterError::InvalidCellValue { tag, coordinate }) => {
                assert_eq!(tag, tags::CONFIG_INITIAL_CAPITAL);
                assert_eq!(coordinate, coord("B3"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
