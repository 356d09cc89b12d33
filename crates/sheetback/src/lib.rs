//! Spreadsheet-to-backtest adapter.
//!
//! Treats an arbitrary worksheet as a semi-structured data source: cells
//! carrying marker text like `<data::close>` or `<config::initial_capital>`
//! declare where the market data, strategy-signal formulas, configuration
//! values, and result columns live. One load scans the sheet for those
//! anchors, reconciles the data columns to a shared length, resolves the
//! directional config cells, translates the evaluated signal column, runs the
//! external backtest engine, and maps the results back onto coordinates for a
//! single batched write.
//!
//! The formula evaluator and the backtest engine stay behind the
//! [`engine::RangeEvaluator`] and [`engine::BacktestEngine`] traits; worksheet
//! storage stays behind `sheetback-grid`'s reader/sink traits.

pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod scan;
pub mod session;
pub mod signal;
pub mod tags;
pub mod writeback;

pub use config::BacktestConfig;
pub use engine::{BacktestEngine, BacktestRun, Bar, MarketSeries, RangeEvaluator};
pub use error::AdapterError;
pub use reconcile::ReconciledData;
pub use scan::AnchorMap;
pub use session::BacktestSession;
pub use signal::Signal;
pub use tags::{Namespace, Tag};

// Re-exports for downstream hosts.
pub use sheetback_common::{CellValue, Coordinate, Direction};
pub use sheetback_grid::{GridError, MemoryGrid, SheetReader, UpdateMap, UpdateSink};
