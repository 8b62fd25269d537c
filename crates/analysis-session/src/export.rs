use peer_core::TableRow;

/// Render the raw table as CSV using the display column order: `Date` first,
/// then ticker columns alphabetically. One header row, one row per date, no
/// trailing index column.
pub fn to_csv(columns: &[String], rows: &[TableRow]) -> String {
    let mut out = String::new();
    out.push_str(&columns.join(","));
    out.push('\n');

    for row in rows {
        out.push_str(&row.date);
        for cell in &row.cells {
            out.push(',');
            if let Some(value) = cell {
                out.push_str(&value.to_string());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_one_line_per_row() {
        let columns = vec!["Date".to_string(), "AAPL".to_string(), "MSFT".to_string()];
        let rows = vec![
            TableRow { date: "2024-01-02".into(), cells: vec![Some(185.5), Some(370.0)] },
            TableRow { date: "2024-01-03".into(), cells: vec![Some(184.0), None] },
        ];

        let csv = to_csv(&columns, &rows);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Date,AAPL,MSFT");
        assert_eq!(lines[1], "2024-01-02,185.5,370");
        assert_eq!(lines[2], "2024-01-03,184,");
        assert_eq!(lines.len(), 3);
    }
}
