//! Log operations. Everything here is value-oriented: operations return a
//! fresh [`Log`] and never mutate their inputs. Store-touching operations
//! suspend exactly at `put`/`get`; `join` and `join_all` are pure.

use std::collections::HashSet;

use strand_proto::{BlockId, Entry, Heads, LogMeta};
use tracing::debug;

use super::{find_heads, Log};
use crate::{
    error::{MutationError, RetrievalError},
    fetch::fetch_all,
    retrieval::{create_entry, BlockStore},
    sort::{sort, sort_with},
};

impl Log {
    /// Append a payload as a new entry whose parents are the current heads.
    pub async fn append<S: BlockStore>(&self, store: &S, payload: Vec<u8>) -> Result<Log, MutationError> {
        let entry = create_entry(store, payload, self.heads.to_vec()).await?;
        let heads = Heads::single(entry.hash().clone());
        let mut entries = self.entries.clone();
        entries.push(entry);
        Ok(Log { entries, heads })
    }

    /// Deterministic convergent merge of two logs.
    ///
    /// The result is the causal union of both entry sets, linearized by the
    /// sorter and truncated to `size` entries (default: combined length,
    /// keeping the prefix). The merge is oriented by head identity rather
    /// than argument order, so `a.join(&b, n)` and `b.join(&a, n)` agree.
    pub fn join(&self, other: &Log, size: Option<usize>) -> Log {
        let size = size.unwrap_or(self.len() + other.len());

        // Heads that resolve within their own log; dangling heads do not seed the sort.
        let ours: Vec<Entry> = self.heads.iter().filter_map(|h| self.get(h).cloned()).collect();
        let theirs: Vec<Entry> = other.heads.iter().filter_map(|h| other.get(h).cloned()).collect();

        let ours_lead = match (ours.first(), theirs.first()) {
            (Some(a), Some(b)) => a.hash() < b.hash(),
            (Some(_), None) => true,
            (None, _) => false,
        };
        let (mut seeds, rest, first, second) = if ours_lead { (ours, theirs, self, other) } else { (theirs, ours, other, self) };
        seeds.extend(rest);

        let sorted = sort_with(seeds, |id| first.get(id).cloned(), |id| second.get(id).cloned());
        debug!("joined {}+{} entries into {} (cap {})", self.len(), other.len(), sorted.len(), size);

        let entries: Vec<Entry> = sorted.into_iter().take(size).collect();
        let heads: Heads = find_heads(&entries).into();
        Log { entries, heads }
    }

    /// Left fold of [`Log::join`]; the first non-empty log seeds the
    /// accumulator.
    pub fn join_all<I: IntoIterator<Item = Log>>(logs: I, size: Option<usize>) -> Log {
        let mut acc = Log::default();
        for log in logs {
            if acc.is_empty() {
                acc = log;
            } else {
                acc = acc.join(&log, size);
            }
        }
        acc
    }

    /// Grow the log backward along its unresolved ancestry, up to `length`
    /// total entries (`None` = the full reachable DAG). Ids in `exclude` are
    /// treated as already known, in addition to the log's own entries.
    pub async fn expand<S: BlockStore>(&self, store: &S, length: Option<usize>, exclude: &HashSet<BlockId>) -> Result<Log, RetrievalError> {
        let tails = self.tails();
        let amount = length.map(|l| l.saturating_sub(self.len()));
        if tails.is_empty() || amount == Some(0) {
            return Ok(self.clone());
        }

        let mut skip: HashSet<BlockId> = self.entries.iter().map(|e| e.hash().clone()).collect();
        skip.extend(exclude.iter().cloned());

        let fetched = fetch_all(store, tails, amount, &skip).await?;
        debug!("expanded {} entries onto {}", fetched.len(), self.len());

        let mut entries = self.entries.clone();
        entries.extend(fetched);
        Ok(Log::new(sort(entries), None))
    }

    /// Reconstruct a log from a persisted metadata block, loading up to
    /// `length` entries starting at its heads (`None` = everything).
    pub async fn from_hash<S: BlockStore>(store: &S, id: &BlockId, length: Option<usize>) -> Result<Log, RetrievalError> {
        let bytes = store.get(id).await?;
        let meta = LogMeta::from_bytes(&bytes).map_err(|e| RetrievalError::NotALog(id.clone(), e))?;
        debug!("loading log {} from {} heads", id.to_short(), meta.heads.len());

        let entries = sort(fetch_all(store, meta.heads.clone(), length, &HashSet::new()).await?);
        Ok(Log::new(entries, Some(meta.heads.into())))
    }

    /// Persist the log's metadata block, returning its content address.
    pub async fn to_hash<S: BlockStore>(&self, store: &S) -> Result<BlockId, MutationError> {
        if self.is_empty() {
            return Err(MutationError::EmptyLog);
        }
        store.put(&self.meta().to_bytes()).await
    }
}
