//! The log value: a linearized set of entries plus its current heads.

mod ops;


use std::collections::HashSet;
use std::fmt;

use strand_proto::{BlockId, Entry, Heads, LogMeta};

/// An append-only, content-addressed, causally ordered log.
///
/// `entries` is the deterministic linearization of a partially ordered set of
/// [`Entry`] values; `heads` are the hashes referenced as a parent by no other
/// entry present. Logs are immutable values: every operation returns a fresh
/// log and leaves its inputs observationally unchanged, so they are freely
/// shareable across tasks.
///
/// A log materialized from the store with an unbounded length is causally
/// closed; a bounded log may carry dangling parent references ("tails") that
/// [`Log::expand`] can load later.
#[derive(Debug, Clone, Default)]
pub struct Log {
    entries: Vec<Entry>,
    heads: Heads,
}

impl Log {
    /// Construct a log from a linearized entry sequence.
    ///
    /// Duplicate hashes are dropped, first occurrence wins. When `heads` is
    /// `None` they are recomputed from the entry set.
    pub fn new(entries: Vec<Entry>, heads: Option<Heads>) -> Self {
        let mut seen = HashSet::new();
        let entries: Vec<Entry> = entries.into_iter().filter(|e| seen.insert(e.hash().clone())).collect();
        let heads = heads.unwrap_or_else(|| find_heads(&entries).into());
        Self { entries, heads }
    }

    /// The linearized entry sequence, oldest first.
    pub fn items(&self) -> &[Entry] { &self.entries }

    pub fn heads(&self) -> &Heads { &self.heads }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Look up an entry by hash.
    pub fn get(&self, id: &BlockId) -> Option<&Entry> { self.entries.iter().find(|e| e.hash() == id) }

    pub fn contains(&self, id: &BlockId) -> bool { self.get(id).is_some() }

    /// Hashes referenced as a parent but not present in the log: the
    /// reachable-but-unloaded ancestry, in lexicographic order.
    pub fn tails(&self) -> Vec<BlockId> {
        let present: HashSet<&BlockId> = self.entries.iter().map(|e| e.hash()).collect();
        let mut tails: Vec<BlockId> = Vec::new();
        for entry in &self.entries {
            for id in entry.next() {
                if !present.contains(id) && !tails.contains(id) {
                    tails.push(id.clone());
                }
            }
        }
        tails.sort();
        tails
    }

    /// The metadata value persisted by [`Log::to_hash`].
    pub fn meta(&self) -> LogMeta { LogMeta { heads: self.heads.to_vec() } }

    /// Length of the child chain sitting on top of `entry`, following the
    /// first referencing entry at each step.
    fn chain_depth(&self, entry: &Entry) -> usize {
        let mut depth = 0;
        let mut current = entry.hash();
        // forged blocks can reference arbitrary ids; cap the walk at log length
        while depth < self.entries.len() {
            match self.entries.iter().find(|e| e.references(current)) {
                Some(child) => {
                    depth += 1;
                    current = child.hash();
                }
                None => break,
            }
        }
        depth
    }
}

/// Hashes of entries referenced as a parent by no other entry in `entries`,
/// in lexicographic order.
pub fn find_heads(entries: &[Entry]) -> Vec<BlockId> {
    let mut heads: Vec<BlockId> = entries
        .iter()
        .filter(|e| !entries.iter().any(|other| other.references(e.hash())))
        .map(|e| e.hash().clone())
        .collect();
    heads.sort();
    heads
}

impl fmt::Display for Log {
    /// Render newest first, one line per entry: the payload, indented by the
    /// entry's ancestry depth with `└─` marking the last level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let depth = self.chain_depth(entry);
            if depth > 0 {
                write!(f, "{}└─", "  ".repeat(depth - 1))?;
            }
            write!(f, "{}", String::from_utf8_lossy(entry.payload()))?;
        }
        Ok(())
    }
}
