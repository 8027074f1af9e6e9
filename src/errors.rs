use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    /// Metadata could not be fetched. The pipeline substitutes a placeholder.
    #[error("metadata unavailable at {uri}: {reason}")]
    MetadataUnavailable { uri: String, reason: String },

    /// One record could not be enriched and is dropped from the batch.
    #[error("token #{token_id} dropped: {reason}")]
    RecordProcessing { token_id: String, reason: String },

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl MarketError {
    pub fn invalid_amount(value: impl ToString, reason: impl ToString) -> Self {
        MarketError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
