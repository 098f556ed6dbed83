use std::path::PathBuf;

use async_trait::async_trait;
use sled::Config;
use strand_core::{
    error::{MutationError, RetrievalError},
    retrieval::BlockStore,
};
use strand_proto::BlockId;

use crate::error::{mutation, retrieval};

/// Content-addressed block store on a single sled tree.
///
/// Blocks are keyed by the string form of their id; ids are assigned with the
/// workspace-wide content addressing, so a sled store and a memory store agree
/// on every id.
pub struct SledBlockStore {
    db: sled::Db,
    blocks: sled::Tree,
}

impl SledBlockStore {
    pub fn with_homedir_folder(folder_name: &str) -> anyhow::Result<Self> {
        let dir = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?.join(folder_name);

        Self::with_path(dir)
    }

    pub fn with_path(path: PathBuf) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&path)?;
        let db = sled::open(path.join("sled"))?;
        Self::open(db)
    }

    // Open the store in its default home directory location
    pub fn new() -> anyhow::Result<Self> { Self::with_homedir_folder(".strand") }

    pub fn new_test() -> anyhow::Result<Self> {
        let db = Config::new().temporary(true).flush_every_ms(None).open()?;
        Self::open(db)
    }

    fn open(db: sled::Db) -> anyhow::Result<Self> {
        let blocks = db.open_tree("blocks")?;
        Ok(Self { db, blocks })
    }

    pub fn len(&self) -> usize { self.blocks.len() }

    pub fn is_empty(&self) -> bool { self.blocks.is_empty() }

    /// Flush dirty buffers to disk.
    pub fn flush(&self) -> anyhow::Result<usize> { Ok(self.db.flush()?) }
}

#[async_trait]
impl BlockStore for SledBlockStore {
    async fn put(&self, bytes: &[u8]) -> Result<BlockId, MutationError> {
        let id = BlockId::from_content(bytes);
        self.blocks.insert(id.as_str(), bytes).map_err(mutation)?;
        Ok(id)
    }

    async fn get(&self, id: &BlockId) -> Result<Vec<u8>, RetrievalError> {
        match self.blocks.get(id.as_str()).map_err(retrieval)? {
            Some(ivec) => Ok(ivec.to_vec()),
            None => Err(RetrievalError::NotFound(id.clone())),
        }
    }
}
