//! Vector-backed conversational memory.

use braid_core::prelude::*;
use parking_lot::RwLock;
use std::sync::Arc;

/// Default number of turn batches returned per query.
pub const DEFAULT_TOP_K: usize = 2;

/// A conversation turn: the messages embedded and retrieved as one unit.
struct Batch {
    embedding: Vec<f32>,
    messages: Vec<ChatMessage>,
}

struct Store {
    batches: Vec<Batch>,
    dim: Option<usize>,
}

/// Memory source that retrieves conversation turns by embedding similarity.
///
/// Messages are batched into turns anchored at user messages: a user message
/// opens a new batch, and subsequent non-user messages join it. Every `put`
/// re-embeds the current batch's joined text and upserts it, so the open
/// batch is always searchable. `get` embeds the query and returns the
/// messages of the `top_k` most cosine-similar batches, flattened in rank
/// order.
pub struct VectorMemory {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    store: RwLock<Store>,
}

impl VectorMemory {
    /// Create a vector memory over an embedder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            top_k: DEFAULT_TOP_K,
            store: RwLock::new(Store {
                batches: Vec::new(),
                dim: None,
            }),
        }
    }

    /// Set how many batches a query returns.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Number of stored batches.
    pub fn batch_count(&self) -> usize {
        self.store.read().batches.len()
    }

    fn embed_checked(&self, store: &mut Store, text: &str) -> Result<Vec<f32>> {
        let embedding = self.embedder.embed(text)?;
        match store.dim {
            None => store.dim = Some(embedding.len()),
            Some(dim) if dim != embedding.len() => {
                return Err(BraidError::EmbeddingDimension {
                    expected: dim,
                    actual: embedding.len(),
                });
            }
            Some(_) => {}
        }
        Ok(embedding)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl MemorySource for VectorMemory {
    fn put(&self, message: ChatMessage) -> Result<()> {
        let mut store = self.store.write();

        let open_new = message.role == Role::User || store.batches.is_empty();
        if open_new {
            store.batches.push(Batch {
                embedding: Vec::new(),
                messages: Vec::new(),
            });
        }

        let last = store.batches.len() - 1;
        store.batches[last].messages.push(message);

        let text = store.batches[last]
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let embedding = self.embed_checked(&mut store, &text)?;
        store.batches[last].embedding = embedding;

        tracing::debug!(batches = store.batches.len(), "Upserted turn batch");
        Ok(())
    }

    fn get(&self, query: &str) -> Result<Vec<ChatMessage>> {
        let mut store = self.store.write();
        if store.batches.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embed_checked(&mut store, query)?;

        let mut ranked: Vec<(f32, usize)> = store
            .batches
            .iter()
            .enumerate()
            .map(|(i, batch)| (cosine(&query_embedding, &batch.embedding), i))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut out = Vec::new();
        for (similarity, index) in ranked.into_iter().take(self.top_k) {
            tracing::debug!(index, similarity, "Retrieved turn batch");
            out.extend(store.batches[index].messages.iter().cloned());
        }
        Ok(out)
    }

    fn get_all(&self) -> Result<Vec<ChatMessage>> {
        Ok(self
            .store
            .read()
            .batches
            .iter()
            .flat_map(|b| b.messages.iter().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TableEmbedder {
        table: HashMap<&'static str, Vec<f32>>,
    }

    impl TableEmbedder {
        fn new(entries: &[(&'static str, &[f32])]) -> Self {
            Self {
                table: entries.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
            }
        }
    }

    impl Embedder for TableEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.table
                .get(text)
                .cloned()
                .ok_or_else(|| BraidError::Embedding {
                    text: text.to_string(),
                    cause: "no table entry".to_string(),
                })
        }
    }

    #[test]
    fn user_messages_anchor_batches() {
        let embedder = Arc::new(TableEmbedder::new(&[
            ("a", &[1.0, 0.0]),
            ("a b", &[1.0, 1.0]),
            ("c", &[0.0, 1.0]),
        ]));
        let memory = VectorMemory::new(embedder);

        memory.put(ChatMessage::user("a")).unwrap();
        memory.put(ChatMessage::assistant("b")).unwrap();
        memory.put(ChatMessage::user("c")).unwrap();

        assert_eq!(memory.batch_count(), 2);
        assert_eq!(memory.get_all().unwrap().len(), 3);
    }

    #[test]
    fn top_k_ranks_by_similarity() {
        let embedder = Arc::new(TableEmbedder::new(&[
            ("north", &[0.0, 1.0]),
            ("east", &[1.0, 0.0]),
            ("query", &[0.1, 1.0]),
        ]));
        let memory = VectorMemory::new(embedder).with_top_k(1);

        memory.put(ChatMessage::user("north")).unwrap();
        memory.put(ChatMessage::user("east")).unwrap();

        let hits = memory.get("query").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "north");
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let embedder = Arc::new(TableEmbedder::new(&[
            ("ok", &[1.0, 0.0]),
            ("bad", &[1.0, 0.0, 0.0]),
        ]));
        let memory = VectorMemory::new(embedder);

        memory.put(ChatMessage::user("ok")).unwrap();
        let err = memory.put(ChatMessage::user("bad")).unwrap_err();
        assert!(matches!(err, BraidError::EmbeddingDimension { .. }));
    }

    #[test]
    fn unknown_text_propagates_embedder_error() {
        let embedder = Arc::new(TableEmbedder::new(&[]));
        let memory = VectorMemory::new(embedder);

        let err = memory.put(ChatMessage::user("mystery")).unwrap_err();
        assert!(matches!(err, BraidError::Embedding { .. }));
    }

    #[test]
    fn empty_memory_returns_nothing() {
        let embedder = Arc::new(TableEmbedder::new(&[]));
        let memory = VectorMemory::new(embedder);
        assert!(memory.get("anything").unwrap().is_empty());
    }
}
