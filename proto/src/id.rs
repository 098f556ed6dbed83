use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content address of a block in the store.
///
/// Ids are opaque printable strings assigned by the block store; the only
/// ordering anything relies on is the lexicographic order of the string form.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// The address every store in this workspace assigns to `bytes`:
    /// SHA-256 over the raw block, url-safe unpadded base64.
    pub fn from_content(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn to_short(&self) -> String {
        // take the last 6 characters for compact display
        let len = self.0.len();
        self.0[len.saturating_sub(6)..].to_string()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> { write!(f, "{}", self.0) }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self { id.0 }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str { &self.0 }
}
