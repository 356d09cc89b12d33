//! Per-load pipeline driver.

use sheetback_grid::{GridError, SheetReader, UpdateMap};

use crate::config::resolve_config;
use crate::engine::{BacktestEngine, RangeEvaluator};
use crate::error::AdapterError;
use crate::reconcile::reconcile;
use crate::scan::scan_worksheet;
use crate::signal::{signal_range, translate};
use crate::tags;
use crate::writeback::build_updates;

/// One worksheet load and the computation over it.
///
/// Every piece of per-load state (anchors, series, config) lives inside a
/// single `compute` call, so concurrent hosts can run one session per
/// request without sharing anything. The pipeline is a single linear pass;
/// the first failure aborts it and, since the update map is built last, a
/// failed load never touches the target worksheet.
pub struct BacktestSession<R> {
    reader: R,
    worksheet: Option<String>,
}

impl<R: SheetReader> BacktestSession<R> {
    pub fn new(reader: R) -> Self {
        BacktestSession {
            reader,
            worksheet: None,
        }
    }

    /// Select the worksheet to compute against. A fresh load always restarts
    /// the pipeline from scratch.
    pub fn load(&mut self, worksheet: &str) -> Result<(), AdapterError> {
        self.worksheet = None;
        if !self.reader.has_sheet(worksheet) {
            return Err(GridError::UnknownSheet(worksheet.to_string()).into());
        }
        self.worksheet = Some(worksheet.to_string());
        Ok(())
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    /// Run the full pipeline: scan, reconcile, resolve config, evaluate and
    /// translate signals, call the engine, and map results back to
    /// coordinates. Returns the batch for the caller's write-back sink.
    pub fn compute<E, B>(
        &self,
        evaluator: &mut E,
        engine: &B,
    ) -> Result<UpdateMap, AdapterError>
    where
        E: RangeEvaluator,
        B: BacktestEngine,
    {
        let sheet = self.worksheet.as_deref().ok_or(AdapterError::NotLoaded)?;

        let anchors = scan_worksheet(&self.reader, sheet)?;
        let data = reconcile(&self.reader, sheet, &anchors)?;
        let config = resolve_config(&self.reader, sheet, &anchors)?;

        let signal_anchor = anchors
            .get(&tags::INPUT_STRATEGY_SIGNAL)
            .ok_or(AdapterError::MissingRequiredColumn {
                tag: tags::INPUT_STRATEGY_SIGNAL,
            })?;
        let target = signal_range(sheet, signal_anchor, data.data_length);
        let evaluated = evaluator.evaluate_range(&target)?;
        let signals = translate(&evaluated, data.data_length)?;

        let series = data.market_series()?;
        let run = engine.run_backtest(&series, &config, &signals)?;

        let updates = build_updates(&self.reader, sheet, &anchors, &run)?;
        tracing::info!(
            sheet,
            data_length = data.data_length,
            bars = run.bars.len(),
            updates = updates.len(),
            "backtest computed"
        );
        Ok(updates)
    }
}
