use peer_core::{AnalysisError, PriceTable, ProviderTable};

/// Clean a raw provider table into a dense price table.
///
/// Forward-fills gaps within each column, then drops any row that still has
/// a missing cell (the leading window before a ticker's first trade). A
/// provider that collapsed a single-ticker request into one unlabeled column
/// gets that column re-labeled with the requested symbol.
pub fn clean(raw: ProviderTable, requested: &[String]) -> Result<PriceTable, AnalysisError> {
    if raw.is_empty() {
        return Err(AnalysisError::ProviderEmpty);
    }

    let mut tickers = Vec::with_capacity(raw.columns.len());
    let mut columns = Vec::with_capacity(raw.columns.len());
    for (i, column) in raw.columns.into_iter().enumerate() {
        let label = match column.label {
            Some(label) => label,
            None if requested.len() == 1 => requested[0].clone(),
            None => match requested.get(i) {
                Some(ticker) => ticker.clone(),
                None => continue,
            },
        };
        tickers.push(label);
        columns.push(column.closes);
    }

    // Forward fill: a missing cell takes the most recent earlier value.
    for closes in &mut columns {
        let mut last = None;
        for cell in closes.iter_mut() {
            match cell {
                Some(value) => last = Some(*value),
                None => *cell = last,
            }
        }
    }

    let mut dates = Vec::with_capacity(raw.dates.len());
    let mut rows = Vec::with_capacity(raw.dates.len());
    for (ri, date) in raw.dates.iter().enumerate() {
        let row: Option<Vec<f64>> = columns.iter().map(|c| c.get(ri).copied().flatten()).collect();
        if let Some(row) = row {
            dates.push(*date);
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(AnalysisError::NoValidData);
    }

    Ok(PriceTable { dates, tickers, rows })
}
