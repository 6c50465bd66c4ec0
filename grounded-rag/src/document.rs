//! Data types for chunks, stable chunk identity, and scored search results.

use serde::{Deserialize, Serialize};

/// A retrievable unit of document text with provenance metadata.
///
/// Chunks are produced by the external ingestion step and are immutable for
/// the lifetime of a corpus snapshot. The retrieval core only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub content: String,
    /// Identifier of the originating document, e.g. `"banking/basel.pdf"`.
    pub source: String,
    /// Single-label industry tag, assigned at ingestion time.
    pub industry: String,
    /// Page number within the source document. `None` means the source is
    /// not paginated; it renders as `unknown` at display boundaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Corpus-wide unique identifier, assigned once at corpus build time.
    pub chunk_id: u64,
    /// Character offset of the chunk within its source document. Used only
    /// as an identity tie-breaker, never for ranking.
    pub start_index: usize,
}

impl Chunk {
    /// Derive the stable identity used to deduplicate occurrences of the
    /// same chunk across independently produced ranked lists.
    pub fn key(&self) -> ChunkKey {
        ChunkKey {
            source: self.source.clone(),
            page: self.page,
            chunk_id: self.chunk_id,
            start_index: self.start_index,
        }
    }
}

/// Stable chunk identity: `(source, page, chunk_id, start_index)`.
///
/// Two chunk records with equal keys are the same retrieval unit even when
/// produced by different retrieval paths (lexical vs. semantic).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkKey {
    pub source: String,
    pub page: Option<u32>,
    pub chunk_id: u64,
    pub start_index: usize,
}

/// A retrieved [`Chunk`] paired with a similarity score in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, page: Option<u32>, chunk_id: u64, start_index: usize) -> Chunk {
        Chunk {
            content: "text".to_string(),
            source: source.to_string(),
            industry: "banking".to_string(),
            page,
            chunk_id,
            start_index,
        }
    }

    #[test]
    fn keys_equal_across_paths_for_same_unit() {
        let a = chunk("banking/a.pdf", Some(1), 5, 120);
        let mut b = a.clone();
        b.content = "different snippet of the same chunk".to_string();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn key_distinguishes_start_index() {
        let a = chunk("banking/a.pdf", Some(1), 5, 120);
        let b = chunk("banking/a.pdf", Some(1), 5, 121);
        assert_ne!(a.key(), b.key());
    }
}
