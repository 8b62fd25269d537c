use peer_core::TableRow;
use std::cmp::Ordering;

pub const DATE_COLUMN: &str = "Date";

/// Sort and pagination state for the raw data table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub sort_column: String,
    pub ascending: bool,
    /// 1-based current page.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort_column: DATE_COLUMN.to_string(),
            ascending: false,
            page: 1,
            page_size: 15,
        }
    }
}

impl TableState {
    /// Re-sorting the current column toggles direction; a new column starts
    /// ascending.
    pub fn sort_by(&mut self, column: &str) {
        if self.sort_column == column {
            self.ascending = !self.ascending;
        } else {
            self.sort_column = column.to_string();
            self.ascending = true;
        }
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Set the current page. Requests outside `[1, total_pages]` are rejected
    /// and leave the state unchanged.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn total_pages(&self, row_count: usize) -> usize {
        if row_count == 0 {
            0
        } else {
            (row_count + self.page_size - 1) / self.page_size
        }
    }

    /// Stable sort of the row set by the current column. `Date` compares as
    /// strings, ticker columns numerically with missing cells lowest. The
    /// descending order flips the comparator rather than reversing the
    /// output, so ties keep their encounter order either way.
    pub fn sorted(&self, columns: &[String], rows: &[TableRow]) -> Vec<TableRow> {
        let mut data = rows.to_vec();
        let Some(col_idx) = columns.iter().position(|c| c == &self.sort_column) else {
            return data;
        };

        data.sort_by(|a, b| {
            let ord = if col_idx == 0 {
                a.date.cmp(&b.date)
            } else {
                let av = a.cells.get(col_idx - 1).copied().flatten();
                let bv = b.cells.get(col_idx - 1).copied().flatten();
                compare_cells(av, bv)
            };
            if self.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        data
    }

    /// Slice of the sorted rows for the current page.
    pub fn paginate<'a>(&self, rows: &'a [TableRow]) -> &'a [TableRow] {
        let start = (self.page - 1) * self.page_size;
        if start >= rows.len() {
            return &[];
        }
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}

fn compare_cells(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::NEG_INFINITY);
    let b = b.unwrap_or(f64::NEG_INFINITY);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
