//! # Strand
//!
//! Strand is an append-only, content-addressed, causally ordered log: a
//! CRDT-style building block for peer-to-peer applications. Each log is a
//! partially ordered set of immutable entries linked by back-references to
//! their causal parents, persisted to and reconstructed from a
//! content-addressed block store. Two concurrently diverging copies of a log
//! merge into a unique deterministic result without coordination.
//!
//! ## Core Concepts
//!
//! - **Entry**: an immutable DAG node holding an opaque payload, ordered
//!   parent references and a store-assigned content address
//! - **Log**: an immutable value holding a deterministic linearization of an
//!   entry set plus its current heads
//! - **Heads**: the entry hashes referenced as a parent by no other entry
//! - **Block store**: the only external collaborator, providing
//!   `put(bytes) -> id` and `get(id) -> bytes`
//!
//! ## Example
//!
//! ```rust
//! # use strand::{Log, MemoryBlockStore};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryBlockStore::new();
//!
//! let log = Log::default().append(&store, b"one".to_vec()).await?;
//! let log = log.append(&store, b"two".to_vec()).await?;
//!
//! // persist the log and load it back through its metadata block
//! let id = log.to_hash(&store).await?;
//! let copy = Log::from_hash(&store, &id, None).await?;
//! assert_eq!(copy.len(), 2);
//! assert_eq!(copy.heads(), log.heads());
//!
//! // concurrent branches merge deterministically
//! let left = log.append(&store, b"left".to_vec()).await?;
//! let right = log.append(&store, b"right".to_vec()).await?;
//! let merged = left.join(&right, None);
//! assert_eq!(merged.len(), 4);
//! # Ok(())
//! # }
//! ```

pub use strand_core::{error, fetch, log, retrieval, sort, storage};
pub use strand_core::{find_heads, BlockStore, Log, MemoryBlockStore, MutationError, RetrievalError};
pub use strand_proto as proto;
pub use strand_proto::{BlockId, Entry, Heads, LogMeta};
