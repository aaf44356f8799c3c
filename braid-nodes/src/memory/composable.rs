//! Multi-source memory composition.

use braid_core::prelude::*;
use std::sync::Arc;

/// Opening of the synthesized system message.
const SYSTEM_INTRO: &str = "You are a helpful assistant.\n\nBelow are a set of relevant dialogues retrieved from potentially several memory sources:";

/// Closing sentence of the synthesized system message. The wording is the
/// established wire format; downstream consumers match on it verbatim.
const SYSTEM_OUTRO: &str = "This is the end of the of retrieved message dialogues.";

/// Merges retrieval results from multiple memory sources.
///
/// The first source is the designated primary: its full history forms the
/// tail of every `get` result. The remaining sources are secondary; `get`
/// queries each of them and wraps each non-empty result in a delimiter
/// block numbered by the source's 1-based position among the secondaries,
/// concatenating the blocks into one synthesized system message. Secondary
/// sources with no relevant messages contribute nothing and are skipped
/// without error. `put` fans out to every source in order; a failing source
/// aborts the whole operation.
pub struct ComposableMemory {
    sources: Vec<Arc<dyn MemorySource>>,
}

impl ComposableMemory {
    /// Create a composable memory from an ordered list of sources.
    ///
    /// The first source is the primary. Fails fast if no sources are given.
    pub fn new(sources: Vec<Arc<dyn MemorySource>>) -> Result<Self> {
        if sources.is_empty() {
            return Err(BraidError::MemorySource {
                cause: "composable memory requires at least one source".to_string(),
            });
        }
        Ok(Self { sources })
    }

    /// The designated primary source.
    pub fn primary(&self) -> &dyn MemorySource {
        self.sources[0].as_ref()
    }

    /// Number of configured sources, primary included.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    fn render_block(position: usize, messages: &[ChatMessage]) -> String {
        let lines = messages
            .iter()
            .map(|m| format!("\t{}: {}", m.role.as_upper(), m.content))
            .collect::<Vec<_>>()
            .join("\n");
        // The end delimiter carries one more '=' than the start delimiter;
        // preserved as the established wire format.
        format!(
            "=====Relevant messages from memory source {position}=====\n\n{lines}\n\n=====End of relevant messages from memory source {position}======"
        )
    }
}

impl MemorySource for ComposableMemory {
    fn put(&self, message: ChatMessage) -> Result<()> {
        for source in &self.sources {
            source.put(message.clone())?;
        }
        Ok(())
    }

    fn get(&self, query: &str) -> Result<Vec<ChatMessage>> {
        let mut blocks = Vec::new();
        for (index, source) in self.sources.iter().enumerate().skip(1) {
            let relevant = source.get(query)?;
            tracing::debug!(source = index, hits = relevant.len(), "Queried memory source");
            if relevant.is_empty() {
                continue;
            }
            blocks.push(Self::render_block(index, &relevant));
        }

        let mut out = Vec::new();
        if !blocks.is_empty() {
            let content = format!("{SYSTEM_INTRO}\n\n{}\n\n{SYSTEM_OUTRO}", blocks.join("\n\n"));
            out.push(ChatMessage::system(content));
        }
        out.extend(self.primary().get_all()?);
        Ok(out)
    }

    fn get_all(&self) -> Result<Vec<ChatMessage>> {
        self.primary().get_all()
    }
}
