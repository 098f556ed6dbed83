//! In-memory block store.
//!
//! The ephemeral counterpart to the persistent engines: a plain map guarded by
//! a lock, addressing blocks the same way every other store in the workspace
//! does. Used by tests and by callers that only need a scratch log.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use strand_proto::BlockId;

use crate::{
    error::{MutationError, RetrievalError},
    retrieval::BlockStore,
};

#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: RwLock<HashMap<BlockId, Vec<u8>>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.blocks.read().unwrap().len() }

    pub fn is_empty(&self) -> bool { self.blocks.read().unwrap().is_empty() }

    pub fn contains(&self, id: &BlockId) -> bool { self.blocks.read().unwrap().contains_key(id) }
}

#[async_trait]
impl BlockStore for MemoryBlockStore {
    async fn put(&self, bytes: &[u8]) -> Result<BlockId, MutationError> {
        let id = BlockId::from_content(bytes);
        self.blocks.write().unwrap().insert(id.clone(), bytes.to_vec());
        Ok(id)
    }

    async fn get(&self, id: &BlockId) -> Result<Vec<u8>, RetrievalError> {
        self.blocks.read().unwrap().get(id).cloned().ok_or_else(|| RetrievalError::NotFound(id.clone()))
    }
}
