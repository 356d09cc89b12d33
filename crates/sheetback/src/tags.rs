//! The closed vocabulary of semantic column tags and their cell markers.
//!
//! Worksheet authors label cells with marker text such as `<data::close>` or
//! `<stats::sharpe_ratio>`, optionally alongside a position marker like
//! `<target::right>`. This module is the single source of truth for that
//! vocabulary; the scanner, reconciler, config resolver, and result writer
//! all go through it.

use core::fmt;

use once_cell::sync::Lazy;
use sheetback_common::Direction;

/// The five disjoint tag namespaces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Config,
    Data,
    Input,
    Output,
    Stats,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Config => "config",
            Namespace::Data => "data",
            Namespace::Input => "input",
            Namespace::Output => "output",
            Namespace::Stats => "stats",
        }
    }
}

/// One semantic column identifier, immutable for the process lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Tag {
    namespace: Namespace,
    name: &'static str,
}

impl Tag {
    pub const fn new(namespace: Namespace, name: &'static str) -> Self {
        Tag { namespace, name }
    }

    pub fn namespace(self) -> Namespace {
        self.namespace
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    /// The searchable marker form embedded in cell text, always lower-case.
    pub fn marker(self) -> String {
        format!("<{}::{}>", self.namespace.as_str(), self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}::{}>", self.namespace.as_str(), self.name)
    }
}

pub const CONFIG_ON_BAR_CLOSE: Tag = Tag::new(Namespace::Config, "on_bar_close");
pub const CONFIG_INITIAL_CAPITAL: Tag = Tag::new(Namespace::Config, "initial_capital");
pub const CONFIG_BUY_WITH_EQUITY: Tag = Tag::new(Namespace::Config, "buy_with_equity");
pub const CONFIG_RISK_FREE_RATE: Tag = Tag::new(Namespace::Config, "risk_free_rate");

pub const DATA_TIME: Tag = Tag::new(Namespace::Data, "time");
pub const DATA_OPEN: Tag = Tag::new(Namespace::Data, "open");
pub const DATA_HIGH: Tag = Tag::new(Namespace::Data, "high");
pub const DATA_LOW: Tag = Tag::new(Namespace::Data, "low");
pub const DATA_CLOSE: Tag = Tag::new(Namespace::Data, "close");
pub const DATA_VOLUME: Tag = Tag::new(Namespace::Data, "volume");

pub const INPUT_STRATEGY_SIGNAL: Tag = Tag::new(Namespace::Input, "strategy_signal");

pub const STATS_PINESCRIPT: Tag = Tag::new(Namespace::Stats, "pinescript");

const CONFIG_NAMES: &[&str] = &[
    "on_bar_close",
    "initial_capital",
    "buy_with_equity",
    "risk_free_rate",
];

const DATA_NAMES: &[&str] = &["time", "open", "high", "low", "close", "volume"];

const INPUT_NAMES: &[&str] = &["strategy_signal"];

/// Per-row output fields plus every summary statistic. The `stats` namespace
/// reuses the same list for single summary cells.
const OUTPUT_NAMES: &[&str] = &[
    "time",
    "tick",
    "equity",
    "net_equity",
    "open_profit",
    "position_size",
    "returns",
    "direction",
    "logs",
    "pinescript",
    "omega_ratio",
    "sharpe_ratio",
    "sortino_ratio",
    "profitable",
    "max_drawdown",
    "max_drawdown_pct",
    "max_run_up",
    "max_run_up_pct",
    "net_profit",
    "net_profit_pct",
    "gross_profit",
    "gross_profit_pct",
    "gross_loss",
    "gross_loss_pct",
    "closed_trades",
    "winning_trades",
    "losing_trades",
    "profit_factor",
    "equity_curve_max_drawdown_pct",
    "intra_trade_max_drawdown_pct",
    "net_profit_l_s_ratio",
];

/// Every known tag paired with its pre-rendered marker string.
pub struct TagRegistry {
    entries: Vec<(Tag, String)>,
}

impl TagRegistry {
    fn build() -> Self {
        let mut entries = Vec::new();
        let mut push = |namespace: Namespace, names: &[&'static str]| {
            for &name in names {
                let tag = Tag::new(namespace, name);
                entries.push((tag, tag.marker()));
            }
        };
        push(Namespace::Config, CONFIG_NAMES);
        push(Namespace::Data, DATA_NAMES);
        push(Namespace::Input, INPUT_NAMES);
        push(Namespace::Output, OUTPUT_NAMES);
        push(Namespace::Stats, OUTPUT_NAMES);
        TagRegistry { entries }
    }

    /// All tags with their markers, in declaration order.
    pub fn all(&self) -> impl Iterator<Item = (Tag, &str)> {
        self.entries.iter().map(|(tag, marker)| (*tag, marker.as_str()))
    }

    pub fn in_namespace(&self, namespace: Namespace) -> impl Iterator<Item = Tag> + '_ {
        self.entries
            .iter()
            .map(|(tag, _)| *tag)
            .filter(move |tag| tag.namespace() == namespace)
    }

    /// Tags that must be present in every worksheet: the full `data` set and
    /// the full `input` set.
    pub fn required(&self) -> impl Iterator<Item = Tag> + '_ {
        self.in_namespace(Namespace::Data)
            .chain(self.in_namespace(Namespace::Input))
    }
}

static REGISTRY: Lazy<TagRegistry> = Lazy::new(TagRegistry::build);

pub fn registry() -> &'static TagRegistry {
    &REGISTRY
}

/// Marker form of a position annotation, e.g. `<target::right>`.
pub fn position_marker(direction: Direction) -> String {
    format!("<target::{}>", direction.as_str())
}

/// Extract the position marker embedded in a tag cell's text. Absent or
/// unrecognised annotations default to [`Direction::Bottom`].
pub fn embedded_position(text: &str) -> Direction {
    let lowered = text.to_lowercase();
    for direction in [
        Direction::Right,
        Direction::Left,
        Direction::Top,
        Direction::Bottom,
    ] {
        if lowered.contains(&position_marker(direction)) {
            return direction;
        }
    }
    Direction::Bottom
}
