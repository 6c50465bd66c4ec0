//! Semantic index capability trait.
//!
//! The retrieval core treats the vector index as a capability, not a
//! concrete library: swapping implementations (disk-backed index, hosted
//! service) must not change any ranking, gating, or dedupe behavior. One
//! `nearest` call per query supplies both the relevance-gate scores and the
//! fusion candidates, so the gate is always computed over exactly the chunks
//! that may enter fusion.

use async_trait::async_trait;

use crate::document::ScoredChunk;
use crate::error::Result;

/// Nearest-neighbor search over a persisted embedding index.
///
/// # Contract
///
/// `nearest` returns at most `k` chunks ordered by descending similarity,
/// with scores in `[0, 1]`. Ties are broken by the index's native ordering;
/// the core imposes no secondary tie-break. Failures must surface as `Err`,
/// never as an empty result, so callers can distinguish infrastructure
/// faults from genuine absence of evidence.
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    /// Return the `k` nearest chunks to the query with similarity scores.
    async fn nearest(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>>;
}
