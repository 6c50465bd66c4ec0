//! Immutable corpus snapshot consumed by the retrieval pipeline.

use std::collections::HashSet;
use std::sync::Arc;

use crate::document::Chunk;
use crate::error::{RetrievalError, Result};

/// An immutable, in-memory snapshot of all chunks, loaded once per process.
///
/// Cloning a `Corpus` is cheap: the chunk storage is shared behind an
/// [`Arc`], and no component of the retrieval core ever mutates it, so
/// concurrent queries may read the same snapshot without locking.
#[derive(Debug, Clone)]
pub struct Corpus {
    chunks: Arc<[Chunk]>,
}

impl Corpus {
    /// Build a corpus snapshot from the full chunk list.
    ///
    /// Validates the identity invariant: `chunk_id` must be unique across
    /// the whole corpus, since fusion dedupe and citation references rely
    /// on it resolving to the same chunk on every retrieval pass.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Corpus`] if two chunks share a `chunk_id`.
    pub fn new(chunks: Vec<Chunk>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chunks.len());
        for chunk in &chunks {
            if !seen.insert(chunk.chunk_id) {
                return Err(RetrievalError::Corpus(format!(
                    "duplicate chunk_id {} (source '{}')",
                    chunk.chunk_id, chunk.source
                )));
            }
        }
        Ok(Self { chunks: chunks.into() })
    }

    /// All chunks in corpus order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks in the snapshot.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the snapshot contains no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
