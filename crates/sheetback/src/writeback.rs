//! Maps backtest results back onto worksheet coordinates.

use sheetback_common::CellValue;
use sheetback_grid::{SheetReader, UpdateMap};

use crate::engine::BacktestRun;
use crate::error::AdapterError;
use crate::scan::AnchorMap;
use crate::tags::{self, Namespace};

/// Build the coordinate-to-value batch for a finished run. Performs no I/O
/// beyond re-reading the anchored tag cells for their position markers.
///
/// Per-row output columns land one row below their anchor, one cell per bar.
/// Summary stats land at the tag cell's directional target (default bottom)
/// with the last bar's value, or an empty-string placeholder when the engine
/// did not produce that field. The `stats::pinescript` target receives the
/// run's generated program text.
pub fn build_updates<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
    run: &BacktestRun,
) -> Result<UpdateMap, AdapterError> {
    let registry = tags::registry();
    let mut updates = UpdateMap::new();

    for tag in registry.in_namespace(Namespace::Output) {
        let Some(anchor) = anchors.get(&tag) else {
            continue;
        };
        for (i, bar) in run.bars.iter().enumerate() {
            let coordinate = anchor.with_row(anchor.row() + i as u32 + 1);
            let value = bar
                .field(tag.name())
                .unwrap_or_else(|| CellValue::Text(String::new()));
            updates.insert(coordinate, value);
        }
    }

    let last_bar = run.bars.last();
    for tag in registry.in_namespace(Namespace::Stats) {
        let Some(anchor) = anchors.get(&tag) else {
            continue;
        };
        let label = reader.cell(sheet, anchor)?;
        let direction = tags::embedded_position(label.as_text().unwrap_or(""));
        let target = anchor
            .offset(direction)
            .ok_or_else(|| AdapterError::off_grid(anchor, direction))?;
        let value = if tag == tags::STATS_PINESCRIPT {
            CellValue::Text(run.pinescript.clone())
        } else {
            last_bar
                .and_then(|bar| bar.field(tag.name()))
                .unwrap_or_else(|| CellValue::Text(String::new()))
        };
        updates.insert(target, value);
    }

    tracing::debug!(sheet, updates = updates.len(), "update map built");
    Ok(updates)
}
