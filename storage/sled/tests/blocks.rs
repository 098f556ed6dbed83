mod common;

use strand_core::{error::RetrievalError, BlockStore, MemoryBlockStore};
use strand_proto::BlockId;
use strand_storage_sled::SledBlockStore;

#[tokio::test]
async fn blocks_round_trip() {
    let store = SledBlockStore::new_test().unwrap();

    let id = store.put(b"some bytes").await.unwrap();
    assert_eq!(store.get(&id).await.unwrap(), b"some bytes");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn put_is_idempotent_for_identical_content() {
    let store = SledBlockStore::new_test().unwrap();

    let a = store.put(b"same").await.unwrap();
    let b = store.put(b"same").await.unwrap();

    assert_eq!(a, b);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn ids_agree_with_the_memory_store() {
    let sled = SledBlockStore::new_test().unwrap();
    let memory = MemoryBlockStore::new();

    let a = sled.put(b"shared content").await.unwrap();
    let b = memory.put(b"shared content").await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn absent_blocks_are_not_found() {
    let store = SledBlockStore::new_test().unwrap();
    let id: BlockId = "never stored".into();

    assert!(matches!(store.get(&id).await, Err(RetrievalError::NotFound(missing)) if missing == id));
}
