use crate::normalize;
use peer_core::{signed_pct, ticker_color, PanelPoint, PriceTable, RelativeStrengthPanel};

/// Fraction of the value range, read top to bottom on a chart, where the
/// differential crosses zero. Drives the color split of the area fill.
pub(crate) fn gradient_offset(diff: &[f64]) -> f64 {
    let Some(&head) = diff.first() else {
        return 0.5;
    };
    let (mut mx, mut mn) = (head, head);
    for &d in &diff[1..] {
        mx = mx.max(d);
        mn = mn.min(d);
    }

    if mx.is_nan() || mn.is_nan() || mx == mn {
        0.5
    } else if mx <= 0.0 {
        0.0
    } else if mn >= 0.0 {
        1.0
    } else {
        mx / (mx - mn)
    }
}

/// Build one relative-strength panel per selected ticker, comparing its
/// baseline-normalized series against the mean of all other selected
/// tickers. Returns an empty collection when fewer than two tickers are
/// selected; a ticker missing from the table, or one whose peer set is
/// empty, is skipped.
pub fn build_panels(table: &PriceTable, selected: &[String]) -> Vec<RelativeStrengthPanel> {
    if selected.len() < 2 || table.is_empty() {
        return Vec::new();
    }

    let norm = normalize(table);
    let mut panels = Vec::with_capacity(selected.len());
    for (i, ticker) in selected.iter().enumerate() {
        let Some(t_idx) = norm.ticker_index(ticker) else {
            continue;
        };
        let peer_idx: Vec<usize> = selected
            .iter()
            .filter(|p| p.as_str() != ticker.as_str())
            .filter_map(|p| norm.ticker_index(p))
            .collect();
        if peer_idx.is_empty() {
            continue;
        }

        let mut series = Vec::with_capacity(norm.dates.len());
        let mut diffs = Vec::with_capacity(norm.dates.len());
        for (date, row) in norm.dates.iter().zip(&norm.rows) {
            let stock = row[t_idx];
            let peer = peer_idx.iter().map(|&j| row[j]).sum::<f64>() / peer_idx.len() as f64;
            let diff = stock - peer;
            diffs.push(diff);
            series.push(PanelPoint {
                date: date.format("%Y-%m-%d").to_string(),
                stock: Some(stock),
                peer: Some(peer),
                diff: Some(diff),
            });
        }

        let current_diff = diffs.last().copied().unwrap_or(0.0);
        panels.push(RelativeStrengthPanel {
            ticker: ticker.clone(),
            color: ticker_color(i).to_string(),
            current_diff,
            current_diff_formatted: signed_pct(current_diff * 100.0),
            gradient_offset: gradient_offset(&diffs),
            series,
        });
    }
    panels
}
