use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please select at least one ticker.")]
    EmptySelection,

    #[error("No data returned from provider.")]
    ProviderEmpty,

    #[error("No valid price data found after processing.")]
    NoValidData,

    #[error("Ticker {0} is already selected.")]
    DuplicateTicker(String),

    #[error("Provider request failed: {0}")]
    Transport(String),
}
