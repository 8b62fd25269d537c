use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use peer_core::{AnalysisError, PriceProvider, ProviderColumn, ProviderTable};
use std::collections::BTreeMap;
use std::time::Duration;

const CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart-API client producing daily closing prices.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
}

impl YahooClient {
    pub fn new() -> Self {
        // Yahoo rejects the default reqwest user agent.
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Daily closes for one symbol, keyed by trading date. A symbol with no
    /// chart data yields an empty map rather than an error, so one delisted
    /// ticker does not sink the whole batch.
    async fn symbol_closes(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
    ) -> Result<BTreeMap<NaiveDate, f64>, AnalysisError> {
        let url = format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            CHART_URL, symbol, period1, period2
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Transport(format!(
                "HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let Some(chart) = json
            .get("chart")
            .and_then(|v| v.get("result"))
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
        else {
            tracing::warn!("no chart data for {}", symbol);
            return Ok(BTreeMap::new());
        };

        let timestamps = chart
            .get("timestamp")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let closes = chart
            .get("indicators")
            .and_then(|v| v.get("quote"))
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|q| q.get("close"))
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut out = BTreeMap::new();
        for (ts, close) in timestamps.iter().zip(&closes) {
            // Nulls appear for halted days; the pipeline forward-fills them.
            let (Some(ts), Some(close)) = (ts.as_i64(), close.as_f64()) else {
                continue;
            };
            let Some(dt) = DateTime::from_timestamp(ts, 0) else {
                continue;
            };
            out.insert(dt.date_naive(), close);
        }

        tracing::debug!("{}: {} trading days", symbol, out.len());
        Ok(out)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for YahooClient {
    async fn daily_closes(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ProviderTable, AnalysisError> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();

        let mut per_symbol = Vec::with_capacity(tickers.len());
        for symbol in tickers {
            per_symbol.push(self.symbol_closes(symbol, period1, period2).await?);
        }

        // Union of trading dates across all symbols, ascending; symbols that
        // did not trade on a date get a gap for the cleaner to fill.
        let mut dates: Vec<NaiveDate> = per_symbol
            .iter()
            .flat_map(|closes| closes.keys().copied())
            .collect();
        dates.sort();
        dates.dedup();

        let columns = tickers
            .iter()
            .zip(&per_symbol)
            .map(|(symbol, closes)| ProviderColumn {
                label: Some(symbol.clone()),
                closes: dates.iter().map(|d| closes.get(d).copied()).collect(),
            })
            .collect();

        Ok(ProviderTable { dates, columns })
    }
}
