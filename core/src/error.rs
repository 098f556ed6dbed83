//! Public error types for strand.
//!
//! Errors surface to the caller unchanged: the core performs no retries, no
//! fallbacks and no partial results.

use strand_proto::{BlockId, DecodeError};
use thiserror::Error;

/// Error type for operations that read from the block store.
///
/// Returned from: `fetch_entry`, `fetch_all`, `Log::from_hash`, `Log::expand`
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// No block stored under this id
    #[error("block not found: {0}")]
    NotFound(BlockId),

    /// The block exists but does not decode to an entry
    #[error("malformed entry block {0}: {1}")]
    Malformed(BlockId, DecodeError),

    /// The block exists but is not a log metadata block
    #[error("block {0} is not a log: {1}")]
    NotALog(BlockId, DecodeError),

    /// The underlying store failed
    #[error("storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Error type for operations that write to the block store.
///
/// Returned from: `create_entry`, `Log::append`, `Log::to_hash`
#[derive(Debug, Error)]
pub enum MutationError {
    /// `to_hash` on a log with no entries
    #[error("cannot persist an empty log")]
    EmptyLog,

    /// The underlying store failed
    #[error("storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync + 'static>),
}
