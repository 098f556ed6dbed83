pub mod error;
pub mod fetch;
pub mod log;
pub mod retrieval;
pub mod sort;
pub mod storage;

pub use error::{MutationError, RetrievalError};
pub use fetch::fetch_all;
pub use log::{find_heads, Log};
pub use retrieval::BlockStore;
pub use storage::MemoryBlockStore;

pub use strand_proto as proto;
pub use strand_proto::{BlockId, Entry, Heads, LogMeta};
