use strand_core::error::{MutationError, RetrievalError};

/// Map a sled failure into the core's read-side error.
pub fn retrieval(err: sled::Error) -> RetrievalError { RetrievalError::StorageError(Box::new(err)) }

/// Map a sled failure into the core's write-side error.
pub fn mutation(err: sled::Error) -> MutationError { MutationError::StorageError(Box::new(err)) }
