//! Block-store access for the log core.
//!
//! The store is the only external collaborator: a content-addressed byte store
//! with `put` and `get`. Everything the core knows about persistence goes
//! through the [`BlockStore`] trait; entry materialization lives here so the
//! traversal and log operations never touch raw bytes themselves.

use async_trait::async_trait;
use strand_proto::{BlockId, Entry};

use crate::error::{MutationError, RetrievalError};

/// A content-addressed block store.
///
/// `put` must be idempotent with respect to content: storing the same bytes
/// twice yields the same id and keeps a single copy. Ids are opaque to the
/// core; their only required property is a total lexicographic order on the
/// string form.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Store `bytes`, returning their content address.
    async fn put(&self, bytes: &[u8]) -> Result<BlockId, MutationError>;

    /// Retrieve the block stored under `id`.
    async fn get(&self, id: &BlockId) -> Result<Vec<u8>, RetrievalError>;
}

#[async_trait]
impl<S: BlockStore + Send + Sync + ?Sized> BlockStore for &S {
    async fn put(&self, bytes: &[u8]) -> Result<BlockId, MutationError> { (*self).put(bytes).await }

    async fn get(&self, id: &BlockId) -> Result<Vec<u8>, RetrievalError> { (*self).get(id).await }
}

#[async_trait]
impl<S: BlockStore + Send + Sync + ?Sized> BlockStore for std::sync::Arc<S> {
    async fn put(&self, bytes: &[u8]) -> Result<BlockId, MutationError> { (**self).put(bytes).await }

    async fn get(&self, id: &BlockId) -> Result<Vec<u8>, RetrievalError> { (**self).get(id).await }
}

/// Write a new entry block and return the entry carrying its assigned address.
pub async fn create_entry<S: BlockStore>(store: &S, payload: Vec<u8>, next: Vec<BlockId>) -> Result<Entry, MutationError> {
    let bytes = Entry::encode(&payload, &next);
    let hash = store.put(&bytes).await?;
    Ok(Entry::new(hash, payload, next))
}

/// Materialize the entry stored at `id`.
pub async fn fetch_entry<S: BlockStore>(store: &S, id: &BlockId) -> Result<Entry, RetrievalError> {
    let bytes = store.get(id).await?;
    Entry::decode(id.clone(), &bytes).map_err(|e| RetrievalError::Malformed(id.clone(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlockStore;

    #[tokio::test]
    async fn entries_round_trip_through_the_store() {
        let store = MemoryBlockStore::new();

        let genesis = create_entry(&store, b"one".to_vec(), vec![]).await.unwrap();
        let child = create_entry(&store, b"two".to_vec(), vec![genesis.hash().clone()]).await.unwrap();

        let fetched = fetch_entry(&store, child.hash()).await.unwrap();
        assert_eq!(fetched, child);
        assert_eq!(fetched.payload(), b"two");
        assert!(fetched.references(genesis.hash()));
    }

    #[tokio::test]
    async fn fetching_a_non_entry_block_is_malformed() {
        let store = MemoryBlockStore::new();
        let id = store.put(b"\xff\xff\xff\xff\xff\xff\xff\xff\xff").await.unwrap();

        match fetch_entry(&store, &id).await {
            Err(RetrievalError::Malformed(bad, _)) => assert_eq!(bad, id),
            other => panic!("expected Malformed, got {:?}", other.map(|e| e.to_string())),
        }
    }

    #[tokio::test]
    async fn fetching_an_unknown_id_is_not_found() {
        let store = MemoryBlockStore::new();
        let missing: BlockId = "nope".into();

        assert!(matches!(fetch_entry(&store, &missing).await, Err(RetrievalError::NotFound(id)) if id == missing));
    }
}
