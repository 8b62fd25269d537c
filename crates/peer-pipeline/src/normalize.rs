use peer_core::PriceTable;

/// Divide every column by its first-row value so each series starts at 1.0.
///
/// Assumes strictly positive first-row prices; a zero would propagate
/// infinities downstream.
pub fn normalize(table: &PriceTable) -> PriceTable {
    let first = table.rows.first().cloned().unwrap_or_default();
    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().zip(&first).map(|(v, base)| v / base).collect())
        .collect();

    PriceTable {
        dates: table.dates.clone(),
        tickers: table.tickers.clone(),
        rows,
    }
}
