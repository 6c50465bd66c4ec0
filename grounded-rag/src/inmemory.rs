//! In-memory semantic index using cosine similarity.
//!
//! [`InMemorySemanticIndex`] pairs an [`Embedder`] with a
//! `tokio::sync::RwLock`-guarded entry list. It is suitable for development,
//! testing, and corpora small enough to embed at startup; production
//! deployments implement [`SemanticIndex`] over a persisted vector store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, ScoredChunk};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::semantic::SemanticIndex;

/// An in-memory [`SemanticIndex`] backed by cosine similarity.
pub struct InMemorySemanticIndex<E: Embedder> {
    embedder: E,
    entries: RwLock<Vec<(Chunk, Vec<f32>)>>,
}

impl<E: Embedder> InMemorySemanticIndex<E> {
    /// Create an empty index over the given embedder.
    pub fn new(embedder: E) -> Self {
        Self { embedder, entries: RwLock::new(Vec::new()) }
    }

    /// Embed and store a batch of chunks.
    ///
    /// # Errors
    ///
    /// Propagates [`RetrievalError::Embedding`](crate::RetrievalError::Embedding)
    /// from the underlying embedder.
    pub async fn index(&self, chunks: &[Chunk]) -> Result<()> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut entries = self.entries.write().await;
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            entries.push((chunk.clone(), embedding));
        }
        Ok(())
    }

    /// Number of indexed chunks.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the index holds no chunks.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl<E: Embedder> SemanticIndex for InMemorySemanticIndex<E> {
    async fn nearest(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                // Cosine lands in [-1, 1]; shift into the trait's [0, 1]
                // score contract so gate thresholds hold for any embedder.
                score: (cosine_similarity(embedding, &query_embedding) + 1.0) / 2.0,
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}
