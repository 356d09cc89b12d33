//! Contracts for the external collaborators: the spreadsheet formula
//! evaluator and the backtest engine. Their internals are out of scope; the
//! adapter only defines what it sends in and expects back.

use serde::{Deserialize, Serialize};
use sheetback_common::CellValue;

use crate::config::BacktestConfig;
use crate::error::AdapterError;
use crate::signal::Signal;

/// The six aligned data series, all exactly data-length entries long.
/// Timestamps are epoch seconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    pub time: Vec<f64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl MarketSeries {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// One row of per-tick backtest output. Running summary statistics ride on
/// every bar; the engine may omit any of them, hence the `Option` fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub tick: i64,
    pub time: f64,
    pub equity: f64,
    pub net_equity: f64,
    pub open_profit: f64,
    pub position_size: f64,
    pub returns: f64,
    pub direction: f64,
    pub logs: String,
    pub omega_ratio: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    pub profitable: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub max_run_up: Option<f64>,
    pub max_run_up_pct: Option<f64>,
    pub net_profit: Option<f64>,
    pub net_profit_pct: Option<f64>,
    pub gross_profit: Option<f64>,
    pub gross_profit_pct: Option<f64>,
    pub gross_loss: Option<f64>,
    pub gross_loss_pct: Option<f64>,
    pub closed_trades: Option<i64>,
    pub winning_trades: Option<i64>,
    pub losing_trades: Option<i64>,
    pub profit_factor: Option<f64>,
    pub equity_curve_max_drawdown_pct: Option<f64>,
    pub intra_trade_max_drawdown_pct: Option<f64>,
    pub net_profit_l_s_ratio: Option<f64>,
}

impl Bar {
    /// Fixed 1:1 mapping from output/stats tag names to bar fields. `None`
    /// for fields this bar does not carry and for names that never live on a
    /// bar (`pinescript` is attached to the run, not the bars).
    pub fn field(&self, name: &str) -> Option<CellValue> {
        match name {
            "tick" => Some(CellValue::Int(self.tick)),
            "time" => Some(CellValue::Number(self.time)),
            "equity" => Some(CellValue::Number(self.equity)),
            "net_equity" => Some(CellValue::Number(self.net_equity)),
            "open_profit" => Some(CellValue::Number(self.open_profit)),
            "position_size" => Some(CellValue::Number(self.position_size)),
            "returns" => Some(CellValue::Number(self.returns)),
            "direction" => Some(CellValue::Number(self.direction)),
            "logs" => Some(CellValue::Text(self.logs.clone())),
            "omega_ratio" => self.omega_ratio.map(CellValue::Number),
            "sharpe_ratio" => self.sharpe_ratio.map(CellValue::Number),
            "sortino_ratio" => self.sortino_ratio.map(CellValue::Number),
            "profitable" => self.profitable.map(CellValue::Number),
            "max_drawdown" => self.max_drawdown.map(CellValue::Number),
            "max_drawdown_pct" => self.max_drawdown_pct.map(CellValue::Number),
            "max_run_up" => self.max_run_up.map(CellValue::Number),
            "max_run_up_pct" => self.max_run_up_pct.map(CellValue::Number),
            "net_profit" => self.net_profit.map(CellValue::Number),
            "net_profit_pct" => self.net_profit_pct.map(CellValue::Number),
            "gross_profit" => self.gross_profit.map(CellValue::Number),
            "gross_profit_pct" => self.gross_profit_pct.map(CellValue::Number),
            "gross_loss" => self.gross_loss.map(CellValue::Number),
            "gross_loss_pct" => self.gross_loss_pct.map(CellValue::Number),
            "closed_trades" => self.closed_trades.map(CellValue::Int),
            "winning_trades" => self.winning_trades.map(CellValue::Int),
            "losing_trades" => self.losing_trades.map(CellValue::Int),
            "profit_factor" => self.profit_factor.map(CellValue::Number),
            "equity_curve_max_drawdown_pct" => {
                self.equity_curve_max_drawdown_pct.map(CellValue::Number)
            }
            "intra_trade_max_drawdown_pct" => {
                self.intra_trade_max_drawdown_pct.map(CellValue::Number)
            }
            "net_profit_l_s_ratio" => self.net_profit_l_s_ratio.map(CellValue::Number),
            _ => None,
        }
    }
}

/// What a backtest run hands back: per-bar records plus the generated
/// PineScript program text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    pub bars: Vec<Bar>,
    pub pinescript: String,
}

/// Formula evaluation over a textual range reference of the form
/// `sheet!A2:A95`, returning one result per cell in order. Empty cells come
/// back as `None`.
pub trait RangeEvaluator {
    fn evaluate_range(&mut self, target: &str) -> Result<Vec<Option<String>>, AdapterError>;
}

/// The external backtest engine call.
pub trait BacktestEngine {
    fn run_backtest(
        &self,
        series: &MarketSeries,
        config: &BacktestConfig,
        signals: &[Signal],
    ) -> Result<BacktestRun, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fields_cover_the_output_vocabulary() {
        let bar = Bar {
            tick: 7,
            equity: 1010.0,
            logs: "entry".into(),
            sharpe_ratio: Some(1.2),
            closed_trades: Some(3),
            ..Bar::default()
        };
        assert_eq!(bar.field("tick"), Some(CellValue::Int(7)));
        assert_eq!(bar.field("equity"), Some(CellValue::Number(1010.0)));
        assert_eq!(bar.field("logs"), Some(CellValue::Text("entry".into())));
        assert_eq!(bar.field("sharpe_ratio"), Some(CellValue::Number(1.2)));
        assert_eq!(bar.field("closed_trades"), Some(CellValue::Int(3)));
        assert_eq!(bar.field("omega_ratio"), None);
        assert_eq!(bar.field("pinescript"), None);
    }
}
