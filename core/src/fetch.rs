//! Bounded materialization of DAG slices from the block store.

use std::collections::{HashSet, VecDeque};

use strand_proto::{BlockId, Entry};
use tracing::trace;

use crate::{
    error::RetrievalError,
    retrieval::{fetch_entry, BlockStore},
};

/// Fetch a causally consistent slice of the DAG reachable from `seeds`.
///
/// The traversal is breadth-first with a causal bias: a fetched entry's
/// parents are queued ahead of the remaining frontier, so ancestry is explored
/// before the current level's siblings. `limit` caps the number of returned
/// entries (`None` = unbounded); ids in `exclude` are treated as already known
/// and are neither fetched nor counted. Every returned entry is reachable from
/// a seed, no hash is returned twice, and any failed or undecodable `get`
/// aborts the whole traversal.
pub async fn fetch_all<S: BlockStore>(
    store: &S,
    seeds: Vec<BlockId>,
    limit: Option<usize>,
    exclude: &HashSet<BlockId>,
) -> Result<Vec<Entry>, RetrievalError> {
    let mut queue: VecDeque<BlockId> = seeds.into();
    let mut result: Vec<Entry> = Vec::new();
    let mut fetched: HashSet<BlockId> = HashSet::new();

    loop {
        if limit.is_some_and(|max| result.len() >= max) {
            break;
        }
        let Some(id) = queue.pop_front() else { break };
        if exclude.contains(&id) || !fetched.insert(id.clone()) {
            continue;
        }

        let entry = fetch_entry(store, &id).await?;
        trace!("fetched {} ({} parents)", id.to_short(), entry.next().len());

        // Parents go to the front of the queue, in their given order.
        for parent in entry.next().iter().rev() {
            queue.push_front(parent.clone());
        }
        result.push(entry);
    }

    Ok(result)
}
