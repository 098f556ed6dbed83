use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::BlockId;

/// The set of entry hashes which currently terminate a log's DAG: entries
/// referenced as a parent by no other entry in the log.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Heads(BTreeSet<BlockId>);

impl Heads {
    pub fn new(ids: impl Into<BTreeSet<BlockId>>) -> Self { Self(ids.into()) }

    pub fn single(id: BlockId) -> Self { Self(BTreeSet::from([id])) }

    pub fn as_set(&self) -> &BTreeSet<BlockId> { &self.0 }

    pub fn contains(&self, id: &BlockId) -> bool { self.0.contains(id) }

    pub fn insert(&mut self, id: BlockId) { self.0.insert(id); }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &BlockId> { self.0.iter() }

    /// Heads in lexicographic order.
    pub fn to_vec(&self) -> Vec<BlockId> { self.0.iter().cloned().collect() }

    pub fn to_strings(&self) -> Vec<String> { self.0.iter().map(|id| id.to_string()).collect() }
}

impl From<Vec<BlockId>> for Heads {
    fn from(ids: Vec<BlockId>) -> Self { Self(ids.into_iter().collect()) }
}

impl From<&Heads> for Vec<BlockId> {
    fn from(heads: &Heads) -> Self { heads.0.iter().cloned().collect() }
}

impl FromIterator<BlockId> for Heads {
    fn from_iter<I: IntoIterator<Item = BlockId>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

impl std::fmt::Display for Heads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "[{}]", self.to_strings().join(", ")) }
}
