use crate::{AnalysisError, ProviderTable};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for daily closing-price providers.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily closes for `tickers` over `[start, end]`, one column per
    /// ticker with `None` for dates a symbol did not trade.
    async fn daily_closes(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ProviderTable, AnalysisError>;
}
