//! Memory-source and embedder traits.

use crate::chat::ChatMessage;
use crate::error::Result;

/// A store of conversational messages that can retrieve the ones relevant
/// to a query.
///
/// Sources are composed by `braid_nodes::memory::ComposableMemory`: `put`
/// fans out to every configured source, `get` merges each source's relevant
/// messages. A failure in either operation aborts the whole composite call;
/// there is no partial-result fallback.
pub trait MemorySource: Send + Sync {
    /// Store a message.
    fn put(&self, message: ChatMessage) -> Result<()>;

    /// Messages relevant to `query`, in source-defined order.
    fn get(&self, query: &str) -> Result<Vec<ChatMessage>>;

    /// The full stored history, in insertion order.
    fn get_all(&self) -> Result<Vec<ChatMessage>>;
}

/// Produces a fixed-dimension embedding vector for a text.
///
/// The embedding model itself is an external collaborator; vector-backed
/// memory sources only depend on this seam, which also makes retrieval
/// deterministic under test.
pub trait Embedder: Send + Sync {
    /// Embed a text into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
