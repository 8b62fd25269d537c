pub mod export;
pub mod table;

#[cfg(test)]
mod session_tests;

use chrono::{Duration, Utc};
use peer_core::{
    ticker_color, AnalysisError, ChangeSummary, Horizon, PriceProvider, PriceTable, ProviderTable,
    RelativeStrengthPanel, TableRow, TickerMeta,
};
use peer_pipeline::{build_panels, clean, normalize, summarize};
use serde::Serialize;
use table::{TableState, DATE_COLUMN};

/// Default selection shown before the user edits anything.
pub const DEFAULT_TICKERS: [&str; 7] = ["AAPL", "MSFT", "AMZN", "NVDA", "TSLA", "GOOGL", "META"];

/// All collections derived from one completed fetch. Computed as a whole by
/// [`AnalysisSnapshot::compute`] and installed wholesale, so a failed fetch
/// can never leave a partially updated mix of old and new results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSnapshot {
    /// Cleaned raw closing prices, dates ascending.
    pub price_table: PriceTable,
    /// Baseline-normalized prices; every column starts at 1.0.
    pub normalized: PriceTable,
    pub summary: ChangeSummary,
    pub panels: Vec<RelativeStrengthPanel>,
    /// Display column order: `Date` first, then tickers alphabetically.
    pub columns: Vec<String>,
    /// Raw table rows aligned to `columns`, in ascending date order.
    pub rows: Vec<TableRow>,
}

impl AnalysisSnapshot {
    /// Run the full pipeline over a raw provider response.
    pub fn compute(raw: ProviderTable, selected: &[String]) -> Result<Self, AnalysisError> {
        let price_table = clean(raw, selected)?;
        let normalized = normalize(&price_table);
        let summary = summarize(&price_table);
        let panels = build_panels(&price_table, selected);
        let (columns, rows) = display_rows(&price_table);

        Ok(Self {
            price_table,
            normalized,
            summary,
            panels,
            columns,
            rows,
        })
    }
}

/// Project the cleaned table into display rows with `Date` first and ticker
/// columns sorted alphabetically.
fn display_rows(table: &PriceTable) -> (Vec<String>, Vec<TableRow>) {
    let mut tickers = table.tickers.clone();
    tickers.sort();
    let indices: Vec<usize> = tickers
        .iter()
        .filter_map(|t| table.ticker_index(t))
        .collect();

    let mut columns = vec![DATE_COLUMN.to_string()];
    columns.extend(tickers);

    let rows = table
        .dates
        .iter()
        .zip(&table.rows)
        .map(|(date, row)| TableRow {
            date: date.format("%Y-%m-%d").to_string(),
            cells: indices.iter().map(|&j| Some(row[j])).collect(),
        })
        .collect();

    (columns, rows)
}

/// One user session: ticker selection, horizon, the latest derived snapshot,
/// and the table view state. All derived data is recomputed atomically per
/// fetch; a failed fetch reports a message and leaves the previous snapshot
/// in place.
pub struct AnalysisSession<P> {
    provider: P,
    ticker_input: String,
    selected_tickers: Vec<String>,
    horizon: Horizon,
    loading: bool,
    error_message: Option<String>,
    snapshot: Option<AnalysisSnapshot>,
    table: TableState,
    /// Monotonic fetch sequence; results from a superseded fetch are dropped.
    fetch_seq: u64,
}

impl<P: PriceProvider> AnalysisSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            ticker_input: String::new(),
            selected_tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            horizon: Horizon::Year1,
            loading: false,
            error_message: None,
            snapshot: None,
            table: TableState::default(),
            fetch_seq: 0,
        }
    }

    pub fn set_ticker_input(&mut self, value: impl Into<String>) {
        self.ticker_input = value.into();
    }

    /// Replace the whole selection (trimmed, uppercased, first occurrence
    /// wins on duplicates).
    pub fn set_selection(&mut self, tickers: impl IntoIterator<Item = String>) {
        self.selected_tickers.clear();
        for ticker in tickers {
            let ticker = ticker.trim().to_uppercase();
            if !ticker.is_empty() && !self.selected_tickers.contains(&ticker) {
                self.selected_tickers.push(ticker);
            }
        }
    }

    /// Add the pending input to the selection. An empty input is a no-op; a
    /// duplicate symbol reports a validation message without fetching. A
    /// successful add refreshes when results are already displayed.
    pub async fn add_ticker(&mut self) {
        let ticker = self.ticker_input.trim().to_uppercase();
        if ticker.is_empty() {
            return;
        }
        if self.selected_tickers.contains(&ticker) {
            self.error_message = Some(AnalysisError::DuplicateTicker(ticker).to_string());
            return;
        }

        self.selected_tickers.push(ticker);
        self.ticker_input.clear();
        if self.has_data() {
            self.refresh().await;
        }
    }

    pub async fn remove_ticker(&mut self, ticker: &str) {
        let Some(pos) = self.selected_tickers.iter().position(|t| t == ticker) else {
            return;
        };
        self.selected_tickers.remove(pos);
        if self.has_data() {
            self.refresh().await;
        }
    }

    pub fn set_horizon(&mut self, horizon: Horizon) {
        self.horizon = horizon;
    }

    /// The single fetch-and-recompute operation. Derived collections are
    /// replaced only on success; any error becomes one user-visible message
    /// and the loading flag clears on every exit path.
    pub async fn refresh(&mut self) {
        if self.selected_tickers.is_empty() {
            self.error_message = Some(AnalysisError::EmptySelection.to_string());
            return;
        }

        let seq = self.begin_fetch();
        let end = Utc::now().date_naive();
        let start = end - Duration::days(self.horizon.days());
        let tickers = self.selected_tickers.clone();

        tracing::info!(
            "fetching {} tickers over {} ({} -> {})",
            tickers.len(),
            self.horizon.label(),
            start,
            end
        );
        let result = self
            .provider
            .daily_closes(&tickers, start, end)
            .await
            .and_then(|raw| AnalysisSnapshot::compute(raw, &tickers));

        self.finish_fetch(seq, result);
    }

    /// Mark a fetch as started and return its sequence number.
    fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error_message = None;
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Install the outcome of fetch `seq`. Results from a superseded fetch
    /// are discarded; the fetch that superseded it owns the loading flag.
    fn finish_fetch(&mut self, seq: u64, result: Result<AnalysisSnapshot, AnalysisError>) {
        if seq != self.fetch_seq {
            tracing::debug!("discarding stale fetch result (seq {seq})");
            return;
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.table.reset_page();
            }
            Err(err) => {
                tracing::warn!("fetch failed: {err}");
                self.error_message = Some(format!("Failed to fetch data: {err}"));
            }
        }
        self.loading = false;
    }

    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn snapshot(&self) -> Option<&AnalysisSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn selected_tickers(&self) -> &[String] {
        &self.selected_tickers
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Ticker/color pairs for the chart legend; the same assignment the
    /// panels use.
    pub fn ticker_metadata(&self) -> Vec<TickerMeta> {
        self.selected_tickers
            .iter()
            .enumerate()
            .map(|(i, ticker)| TickerMeta {
                ticker: ticker.clone(),
                color: ticker_color(i).to_string(),
            })
            .collect()
    }

    pub fn table_state(&self) -> &TableState {
        &self.table
    }

    pub fn sort_by(&mut self, column: &str) {
        self.table.sort_by(column);
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        self.table.set_page(page, total)
    }

    pub fn total_pages(&self) -> usize {
        let rows = self.snapshot.as_ref().map_or(0, |s| s.rows.len());
        self.table.total_pages(rows)
    }

    /// Current page of the sorted raw table.
    pub fn page_rows(&self) -> Vec<TableRow> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        let sorted = self.table.sorted(&snapshot.columns, &snapshot.rows);
        self.table.paginate(&sorted).to_vec()
    }

    /// Raw table as CSV in display column order, or `None` before the first
    /// successful fetch.
    pub fn export_csv(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|s| export::to_csv(&s.columns, &s.rows))
    }
}
