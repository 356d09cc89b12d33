//! Reconciles the declared data columns into one aligned dataset.

use std::collections::BTreeMap;

use sheetback_common::CellValue;
use sheetback_grid::SheetReader;

use crate::engine::MarketSeries;
use crate::error::AdapterError;
use crate::scan::AnchorMap;
use crate::tags::{self, Namespace, Tag};

/// Aligned data series, every one exactly `data_length` entries long.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledData {
    pub data_length: usize,
    pub series: BTreeMap<Tag, Vec<f64>>,
}

impl ReconciledData {
    /// Assemble the market series bundle handed to the backtest engine.
    pub fn market_series(&self) -> Result<MarketSeries, AdapterError> {
        let pick = |tag: Tag| -> Result<Vec<f64>, AdapterError> {
            self.series
                .get(&tag)
                .cloned()
                .ok_or(AdapterError::MissingRequiredColumn { tag })
        };
        Ok(MarketSeries {
            time: pick(tags::DATA_TIME)?,
            open: pick(tags::DATA_OPEN)?,
            high: pick(tags::DATA_HIGH)?,
            low: pick(tags::DATA_LOW)?,
            close: pick(tags::DATA_CLOSE)?,
            volume: pick(tags::DATA_VOLUME)?,
        })
    }
}

/// Walk each data column down from its anchor, take the shortest contiguous
/// run, and extract every column truncated to that shared length.
///
/// The anchor row holds the marker text itself, so the authoritative
/// `data_length` is `min(raw run length) - 1` and values start one row below
/// each anchor.
pub fn reconcile<R: SheetReader>(
    reader: &R,
    sheet: &str,
    anchors: &AnchorMap,
) -> Result<ReconciledData, AdapterError> {
    let (max_row, _) = reader.dimensions(sheet)?;
    let registry = tags::registry();

    let mut raw_lengths: BTreeMap<Tag, u32> = BTreeMap::new();
    for tag in registry.in_namespace(Namespace::Data) {
        let anchor = anchors
            .get(&tag)
            .ok_or(AdapterError::MissingRequiredColumn { tag })?;
        let mut length = 0;
        for row in anchor.row()..=max_row {
            if reader.cell(sheet, &anchor.with_row(row))?.is_empty() {
                break;
            }
            length += 1;
        }
        raw_lengths.insert(tag, length);
    }

    let shortest = raw_lengths.values().copied().min().unwrap_or(0);
    let data_length = shortest.saturating_sub(1) as usize;
    tracing::debug!(sheet, data_length, "data columns reconciled");

    let mut series = BTreeMap::new();
    for tag in registry.in_namespace(Namespace::Data) {
        let anchor = &anchors[&tag];
        let mut values = Vec::with_capacity(data_length);
        for row in anchor.row() + 1..=anchor.row() + data_length as u32 {
            let coordinate = anchor.with_row(row);
            let value = reader.cell(sheet, &coordinate)?;
            if value.is_empty() {
                break;
            }
            let number = to_series_number(&value).ok_or(AdapterError::InvalidCellValue {
                tag,
                coordinate,
            })?;
            values.push(number);
        }
        values.truncate(data_length);
        series.insert(tag, values);
    }

    Ok(ReconciledData {
        data_length,
        series,
    })
}

/// Timestamps become epoch seconds, everything else reads as a float.
fn to_series_number(value: &CellValue) -> Option<f64> {
    value.as_epoch_seconds().or_else(|| value.as_number())
}
