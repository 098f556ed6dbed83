use thiserror::Error;

/// Codec-level failures turning stored blocks back into values.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid entry block: {0}")]
    Entry(#[from] bincode::Error),

    #[error("invalid log metadata block: {0}")]
    Meta(#[from] serde_json::Error),
}
