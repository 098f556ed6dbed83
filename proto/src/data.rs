use serde::{Deserialize, Serialize};

use crate::{error::DecodeError, id::BlockId};

/// An immutable node in the log DAG.
///
/// `hash` is the store-assigned content address of the entry's block and is
/// never part of the encoded body; two entries are equal iff their hashes are
/// equal. `next` is the ordered list of causal parents (empty for genesis
/// entries); the order is preserved but carries no meaning beyond determinism.
#[derive(Debug, Clone, Eq)]
pub struct Entry {
    hash: BlockId,
    payload: Vec<u8>,
    next: Vec<BlockId>,
}

/// On-store form of an entry: exactly the fields that feed the content address.
#[derive(Serialize, Deserialize)]
struct EntryBody {
    payload: Vec<u8>,
    next: Vec<BlockId>,
}

impl Entry {
    /// Assemble an entry from its body and the address the store assigned to it.
    pub fn new(hash: BlockId, payload: Vec<u8>, next: Vec<BlockId>) -> Self { Self { hash, payload, next } }

    pub fn hash(&self) -> &BlockId { &self.hash }

    pub fn payload(&self) -> &[u8] { &self.payload }

    pub fn next(&self) -> &[BlockId] { &self.next }

    /// True iff this entry lists `id` as one of its causal parents.
    pub fn references(&self, id: &BlockId) -> bool { self.next.contains(id) }

    /// Encode an entry body for storage.
    pub fn encode(payload: &[u8], next: &[BlockId]) -> Vec<u8> {
        // This should not be able to fail
        bincode::serialize(&EntryBody { payload: payload.to_vec(), next: next.to_vec() }).expect("Failed to serialize entry body")
    }

    /// Decode a stored block back into the entry addressed by `hash`.
    pub fn decode(hash: BlockId, bytes: &[u8]) -> Result<Self, DecodeError> {
        let body: EntryBody = bincode::deserialize(bytes)?;
        Ok(Self { hash, payload: body.payload, next: body.next })
    }

    pub fn to_bytes(&self) -> Vec<u8> { Self::encode(&self.payload, &self.next) }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool { self.hash == other.hash }
}

impl std::hash::Hash for Entry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.hash.hash(state) }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry({} next=[{}] {}b)",
            self.hash.to_short(),
            self.next.iter().map(|id| id.to_short()).collect::<Vec<_>>().join(", "),
            self.payload.len()
        )
    }
}

/// Log metadata block: the durable pointer to a log's heads.
///
/// Stored as a JSON object `{"heads": [id, ...]}`; unknown fields in stored
/// blocks are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogMeta {
    pub heads: Vec<BlockId>,
}

impl LogMeta {
    pub fn to_bytes(&self) -> Vec<u8> {
        // This should not be able to fail
        serde_json::to_vec(self).expect("Failed to serialize log metadata")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> { Ok(serde_json::from_slice(bytes)?) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_identity_is_the_hash() {
        let a = Entry::new("a".into(), b"one".to_vec(), vec![]);
        let same = Entry::new("a".into(), b"other".to_vec(), vec!["x".into()]);
        let b = Entry::new("b".into(), b"one".to_vec(), vec![]);
        assert_eq!(a, same);
        assert_ne!(a, b);
    }

    #[test]
    fn references_checks_direct_parents_only() {
        let entry = Entry::new("c".into(), b"x".to_vec(), vec!["a".into(), "b".into()]);
        assert!(entry.references(&"a".into()));
        assert!(entry.references(&"b".into()));
        assert!(!entry.references(&"c".into()));
    }

    #[test]
    fn entry_block_survives_the_codec() {
        let bytes = Entry::encode(b"payload", &["p1".into(), "p2".into()]);
        let entry = Entry::decode("self".into(), &bytes).unwrap();
        assert_eq!(entry.payload(), b"payload");
        assert_eq!(entry.next(), &["p1".into(), "p2".into()]);
        assert_eq!(entry.hash(), &"self".into());
    }

    #[test]
    fn meta_block_is_plain_json_with_extras_ignored() {
        let meta = LogMeta::from_bytes(br#"{"heads": ["h1", "h2"], "v": 3}"#).unwrap();
        assert_eq!(meta.heads, vec!["h1".into(), "h2".into()]);

        // an entry block is not a log
        let entry_bytes = Entry::encode(b"payload", &[]);
        assert!(LogMeta::from_bytes(&entry_bytes).is_err());
        // neither is JSON of the wrong shape
        assert!(LogMeta::from_bytes(br#"{"tips": []}"#).is_err());
    }
}
