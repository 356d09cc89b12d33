//! Single-pass worksheet scan that anchors every known tag.

use std::collections::BTreeMap;

use sheetback_common::{Coordinate, coord::column_to_letters};
use sheetback_grid::SheetReader;

use crate::error::AdapterError;
use crate::tags::{self, Tag};

/// Where each tag's marker text was first found.
pub type AnchorMap = BTreeMap<Tag, Coordinate>;

/// Scan every cell once, row-major, and record the first coordinate whose
/// text contains each tag's marker (case-insensitive substring test; later
/// occurrences of an already-anchored tag are ignored).
///
/// Fails with [`AdapterError::MissingRequiredColumn`] naming the first
/// required tag (`data` and `input` namespaces) that never matched.
pub fn scan_worksheet<R: SheetReader>(
    reader: &R,
    sheet: &str,
) -> Result<AnchorMap, AdapterError> {
    let (max_row, max_col) = reader.dimensions(sheet)?;
    let registry = tags::registry();
    let mut anchors = AnchorMap::new();

    for row in 1..=max_row {
        for col in 0..max_col {
            let coordinate = Coordinate::new(column_to_letters(col), row);
            let value = reader.cell(sheet, &coordinate)?;
            // Markers only ever live in text cells.
            let Some(text) = value.as_text() else {
                continue;
            };
            if text.is_empty() {
                continue;
            }
            let lowered = text.to_lowercase();
            for (tag, marker) in registry.all() {
                if !anchors.contains_key(&tag) && lowered.contains(marker) {
                    anchors.insert(tag, coordinate.clone());
                }
            }
        }
    }

    for tag in registry.required() {
        if !anchors.contains_key(&tag) {
            return Err(AdapterError::MissingRequiredColumn { tag });
        }
    }

    tracing::debug!(sheet, anchors = anchors.len(), "worksheet scan complete");
    Ok(anchors)
}
