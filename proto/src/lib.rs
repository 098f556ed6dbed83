pub mod data;
pub mod error;
pub mod heads;
pub mod id;

pub use data::{Entry, LogMeta};
pub use error::DecodeError;
pub use heads::Heads;
pub use id::BlockId;
