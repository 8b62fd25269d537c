#[cfg(test)]
mod tests {
    use crate::{AnalysisSession, AnalysisSnapshot};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use peer_core::{AnalysisError, PriceProvider, ProviderColumn, ProviderTable};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockProvider {
        table: ProviderTable,
        fail: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PriceProvider for MockProvider {
        async fn daily_closes(
            &self,
            _tickers: &[String],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<ProviderTable, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(AnalysisError::Transport("connection reset".to_string()))
            } else {
                Ok(self.table.clone())
            }
        }
    }

    fn sample_table() -> ProviderTable {
        let dates = ["2024-01-02", "2024-01-03", "2024-01-04"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ProviderTable {
            dates,
            columns: vec![
                ProviderColumn {
                    label: Some("AAA".to_string()),
                    closes: vec![Some(10.0), Some(11.0), Some(12.0)],
                },
                ProviderColumn {
                    label: Some("BBB".to_string()),
                    closes: vec![Some(20.0), Some(19.0), Some(18.0)],
                },
            ],
        }
    }

    fn session_with_mock(
        fail: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    ) -> AnalysisSession<MockProvider> {
        let provider = MockProvider {
            table: sample_table(),
            fail,
            calls,
        };
        let mut session = AnalysisSession::new(provider);
        session.set_selection(["AAA".to_string(), "BBB".to_string()]);
        session
    }

    #[tokio::test]
    async fn refresh_installs_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = session_with_mock(Arc::new(AtomicBool::new(false)), calls.clone());

        session.refresh().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(session.has_data());
        assert!(!session.loading());
        assert!(session.error_message().is_none());

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.summary.best_ticker, "AAA");
        assert_eq!(snapshot.summary.worst_ticker, "BBB");
        assert_eq!(snapshot.panels.len(), 2);
        assert_eq!(session.total_pages(), 1);
        assert_eq!(session.table_state().page, 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_snapshot() {
        let fail = Arc::new(AtomicBool::new(false));
        let mut session = session_with_mock(fail.clone(), Arc::new(AtomicUsize::new(0)));

        session.refresh().await;
        let best_before = session.snapshot().unwrap().summary.best_ticker.clone();

        fail.store(true, Ordering::SeqCst);
        session.refresh().await;

        // The error is reported, loading clears, and the old results survive.
        assert!(session.error_message().unwrap().contains("connection reset"));
        assert!(!session.loading());
        assert_eq!(session.snapshot().unwrap().summary.best_ticker, best_before);
    }

    #[tokio::test]
    async fn empty_selection_skips_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = session_with_mock(Arc::new(AtomicBool::new(false)), calls.clone());
        session.set_selection(std::iter::empty());

        session.refresh().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!session.loading());
        assert_eq!(
            session.error_message().unwrap(),
            "Please select at least one ticker."
        );
    }

    #[tokio::test]
    async fn duplicate_add_is_local_validation_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = session_with_mock(Arc::new(AtomicBool::new(false)), calls.clone());

        session.set_ticker_input("aaa ");
        session.add_ticker().await;

        assert_eq!(session.error_message().unwrap(), "Ticker AAA is already selected.");
        assert_eq!(session.selected_tickers().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn add_ticker_normalizes_input_and_refreshes_displayed_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut session = session_with_mock(Arc::new(AtomicBool::new(false)), calls.clone());

        // No data displayed yet: add without fetching.
        session.set_ticker_input(" ccc ");
        session.add_ticker().await;
        assert_eq!(session.selected_tickers().last().unwrap(), "CCC");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        session.refresh().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // With data on screen, removing a ticker recomputes.
        session.remove_ticker("CCC").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.selected_tickers().len(), 2);
    }

    #[tokio::test]
    async fn stale_fetch_result_is_discarded() {
        let mut session =
            session_with_mock(Arc::new(AtomicBool::new(false)), Arc::new(AtomicUsize::new(0)));
        let selected = vec!["AAA".to_string(), "BBB".to_string()];

        let first = session.begin_fetch();
        let second = session.begin_fetch();

        // The superseded fetch completes late; its snapshot must not land.
        let stale = AnalysisSnapshot::compute(sample_table(), &selected).unwrap();
        session.finish_fetch(first, Ok(stale));
        assert!(!session.has_data());
        assert!(session.loading());

        let fresh = AnalysisSnapshot::compute(sample_table(), &selected).unwrap();
        session.finish_fetch(second, Ok(fresh));
        assert!(session.has_data());
        assert!(!session.loading());
    }

    #[tokio::test]
    async fn csv_uses_display_column_order() {
        let mut session =
            session_with_mock(Arc::new(AtomicBool::new(false)), Arc::new(AtomicUsize::new(0)));
        // Select in non-alphabetical order; the export still sorts columns.
        session.set_selection(["BBB".to_string(), "AAA".to_string()]);

        session.refresh().await;
        let csv = session.export_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Date,AAA,BBB");
        assert_eq!(lines.next().unwrap(), "2024-01-02,10,20");
    }
}
