use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotezError {
    /// Network failure or timeout talking to the quote service.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The quote service answered, but not with something we understand.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuotezError>;
