//! analyzer-cli: fetch daily closes for a set of tickers and print the
//! comparative analysis (best/worst performers plus each ticker's relative
//! strength against the peer average).
//!
//! Usage:
//!   cargo run -p analyzer-cli -- --tickers AAPL MSFT NVDA
//!   cargo run -p analyzer-cli -- --horizon 5Y
//!   cargo run -p analyzer-cli -- --csv prices.csv

use analysis_session::AnalysisSession;
use peer_core::Horizon;
use yahoo_client::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analyzer_cli=info,analysis_session=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let horizon = args
        .iter()
        .position(|a| a == "--horizon")
        .and_then(|i| args.get(i + 1))
        .map(|v| {
            Horizon::parse(v)
                .ok_or_else(|| anyhow::anyhow!("unknown horizon {v:?} (expected 1M..20Y)"))
        })
        .transpose()?
        .unwrap_or(Horizon::Year1);

    let csv_path = args
        .iter()
        .position(|a| a == "--csv")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let tickers: Option<Vec<String>> = args.iter().position(|a| a == "--tickers").map(|idx| {
        args[idx + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .cloned()
            .collect()
    });

    let mut session = AnalysisSession::new(YahooClient::new());
    if let Some(tickers) = tickers {
        session.set_selection(tickers);
    }
    session.set_horizon(horizon);

    session.refresh().await;
    if let Some(message) = session.error_message() {
        anyhow::bail!("{message}");
    }
    let snapshot = session
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("no snapshot after refresh"))?;

    let summary = &snapshot.summary;
    println!(
        "{} trading days, {} ({} tickers)",
        snapshot.price_table.dates.len(),
        session.horizon().label(),
        session.selected_tickers().len()
    );
    println!("Best:  {:<6} {}", summary.best_ticker, summary.best_formatted());
    println!("Worst: {:<6} {}", summary.worst_ticker, summary.worst_formatted());

    for panel in &snapshot.panels {
        println!(
            "{:<6} vs peers: {:>9}  (zero-cross at {:.2} of range)",
            panel.ticker, panel.current_diff_formatted, panel.gradient_offset
        );
    }

    if let Some(path) = csv_path {
        if let Some(csv) = session.export_csv() {
            std::fs::write(&path, csv)?;
            tracing::info!("wrote {}", path);
        }
    }

    Ok(())
}
