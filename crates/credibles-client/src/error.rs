use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("receipt source unavailable: {0}")]
    Source(String),

    /// The transaction may still land; poll the same hash again rather than resubmitting.
    #[error("transaction {hash} not settled after {attempts} polls")]
    ConfirmationTimeout { hash: String, attempts: u32 },

    #[error("invalid gate config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("deployment log I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed deployment record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
