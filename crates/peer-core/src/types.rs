use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw date-indexed table as returned by a price provider, before cleaning.
/// Columns may contain gaps (`None`) on dates a symbol did not trade, and a
/// provider that collapses a single-ticker request may leave its one column
/// unlabeled.
#[derive(Debug, Clone, Default)]
pub struct ProviderTable {
    /// Ascending, unique trading dates.
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<ProviderColumn>,
}

#[derive(Debug, Clone)]
pub struct ProviderColumn {
    pub label: Option<String>,
    /// One entry per date in `ProviderTable::dates`.
    pub closes: Vec<Option<f64>>,
}

impl ProviderTable {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }
}

/// Dense closing-price table: every (date, ticker) cell has a value.
/// Also carries the baseline-normalized variant, where every column's first
/// row is exactly 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTable {
    /// Ascending, unique trading dates.
    pub dates: Vec<NaiveDate>,
    /// Column labels in selection order.
    pub tickers: Vec<String>,
    /// Row-major values, one row per date, one cell per ticker.
    pub rows: Vec<Vec<f64>>,
}

impl PriceTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ticker_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }
}

/// Best/worst percent change from the first to the last row of the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub best_ticker: String,
    pub best_change_pct: f64,
    pub worst_ticker: String,
    pub worst_change_pct: f64,
}

impl ChangeSummary {
    pub fn best_formatted(&self) -> String {
        signed_pct(self.best_change_pct)
    }

    pub fn worst_formatted(&self) -> String {
        signed_pct(self.worst_change_pct)
    }
}

/// One point of a relative-strength series: a ticker's normalized value, its
/// peer average, and the differential at one date. Values are optional for
/// symmetry with the raw table shape; cleaning guarantees they are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelPoint {
    pub date: String,
    pub stock: Option<f64>,
    pub peer: Option<f64>,
    pub diff: Option<f64>,
}

/// Per-ticker relative-strength analysis versus the average of its peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeStrengthPanel {
    pub ticker: String,
    /// Hex color matching the ticker's chart line and legend entry.
    pub color: String,
    /// Latest date's stock minus peer-average differential.
    pub current_diff: f64,
    pub current_diff_formatted: String,
    /// Fraction of the chart's vertical extent (top to bottom) where the
    /// differential crosses zero, in [0, 1].
    pub gradient_offset: f64,
    pub series: Vec<PanelPoint>,
}

/// One display-table row of the raw (non-normalized) cleaned table. Cells are
/// aligned to a fixed column list: `Date` first, then ticker columns sorted
/// alphabetically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub date: String,
    pub cells: Vec<Option<f64>>,
}

/// Ticker plus its assigned legend color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerMeta {
    pub ticker: String,
    pub color: String,
}

/// Lookback window for the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    Month1,
    Month3,
    Month6,
    Year1,
    Year5,
    Year10,
    Year20,
}

impl Horizon {
    pub const ALL: [Horizon; 7] = [
        Horizon::Month1,
        Horizon::Month3,
        Horizon::Month6,
        Horizon::Year1,
        Horizon::Year5,
        Horizon::Year10,
        Horizon::Year20,
    ];

    /// Days prior to "now" used to compute the fetch start date.
    pub fn days(&self) -> i64 {
        match self {
            Horizon::Month1 => 30,
            Horizon::Month3 => 90,
            Horizon::Month6 => 180,
            Horizon::Year1 => 365,
            Horizon::Year5 => 1825,
            Horizon::Year10 => 3650,
            Horizon::Year20 => 7300,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Month1 => "1M",
            Horizon::Month3 => "3M",
            Horizon::Month6 => "6M",
            Horizon::Year1 => "1Y",
            Horizon::Year5 => "5Y",
            Horizon::Year10 => "10Y",
            Horizon::Year20 => "20Y",
        }
    }

    pub fn parse(s: &str) -> Option<Horizon> {
        Horizon::ALL.iter().copied().find(|h| h.label() == s)
    }
}

/// Render an already-in-percent value as a signed two-decimal string,
/// e.g. `+3.42%` or `-1.05%`.
pub fn signed_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}
