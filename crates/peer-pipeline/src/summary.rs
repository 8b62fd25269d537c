use peer_core::{ChangeSummary, PriceTable};

/// Best and worst performer over the cleaned table, by percent change from
/// the first to the last row. Ties keep the first ticker encountered. A
/// one-row table yields exactly 0.0 for every ticker (last == first).
pub fn summarize(table: &PriceTable) -> ChangeSummary {
    let (Some(first), Some(last)) = (table.rows.first(), table.rows.last()) else {
        return ChangeSummary::default();
    };

    let mut summary = ChangeSummary::default();
    for (i, ticker) in table.tickers.iter().enumerate() {
        let change = (last[i] / first[i] - 1.0) * 100.0;
        if i == 0 || change > summary.best_change_pct {
            summary.best_ticker = ticker.clone();
            summary.best_change_pct = change;
        }
        if i == 0 || change < summary.worst_change_pct {
            summary.worst_ticker = ticker.clone();
            summary.worst_change_pct = change;
        }
    }
    summary
}
