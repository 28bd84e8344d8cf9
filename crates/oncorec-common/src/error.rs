use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncorecError {
    /// The corpus was never loaded or holds zero records. Terminal:
    /// distinct from "no match found", which still yields a ranking.
    #[error("Treatment corpus is empty: no records to rank against")]
    EmptyCorpus,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OncorecError>;
