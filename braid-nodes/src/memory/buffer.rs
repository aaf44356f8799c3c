//! Unbounded chat history buffer.

use braid_core::prelude::*;
use parking_lot::RwLock;

/// In-memory message buffer.
///
/// Stores the full conversation in insertion order. Retrieval ignores the
/// query: every stored message is considered relevant, which makes the
/// buffer the usual choice for the primary source of a
/// [`ComposableMemory`](super::ComposableMemory).
#[derive(Default)]
pub struct ChatBuffer {
    messages: RwLock<Vec<ChatMessage>>,
}

impl ChatBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl MemorySource for ChatBuffer {
    fn put(&self, message: ChatMessage) -> Result<()> {
        self.messages.write().push(message);
        Ok(())
    }

    fn get(&self, _query: &str) -> Result<Vec<ChatMessage>> {
        Ok(self.messages.read().clone())
    }

    fn get_all(&self) -> Result<Vec<ChatMessage>> {
        Ok(self.messages.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_preserves_order() {
        let buffer = ChatBuffer::new();
        buffer.put(ChatMessage::user("first")).unwrap();
        buffer.put(ChatMessage::assistant("second")).unwrap();

        let all = buffer.get("ignored query").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "first");
        assert_eq!(all[1].content, "second");
        assert_eq!(buffer.get_all().unwrap(), all);
    }

    #[test]
    fn empty_buffer() {
        let buffer = ChatBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.get("q").unwrap().is_empty());
    }
}
