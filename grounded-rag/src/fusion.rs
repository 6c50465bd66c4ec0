//! Reciprocal rank fusion of the lexical and semantic ranked lists.
//!
//! For each chunk at 1-indexed rank `r` in either list, the fused score
//! accumulates `1 / (rrf_k + r)` keyed by [`ChunkKey`]; a chunk present in
//! both lists sums both contributions. The lexical list is scanned before
//! the semantic list, and equal fused scores break by first-encounter order,
//! so the merge is deterministic by construction. The first record seen for
//! a key is authoritative if the same key ever maps to structurally
//! different records.

use std::collections::HashMap;

use crate::document::{Chunk, ChunkKey};

struct FusedEntry {
    chunk: Chunk,
    score: f64,
}

/// Accumulate and sort fused entries without truncation.
fn fuse(lexical: &[Chunk], semantic: &[Chunk], rrf_k: u32) -> Vec<FusedEntry> {
    // Entries keep first-encounter order; the map only locates them.
    let mut order: Vec<FusedEntry> = Vec::new();
    let mut by_key: HashMap<ChunkKey, usize> = HashMap::new();

    for list in [lexical, semantic] {
        for (rank, chunk) in list.iter().enumerate() {
            let contribution = 1.0 / (f64::from(rrf_k) + (rank + 1) as f64);
            match by_key.get(&chunk.key()) {
                Some(&slot) => order[slot].score += contribution,
                None => {
                    by_key.insert(chunk.key(), order.len());
                    order.push(FusedEntry { chunk: chunk.clone(), score: contribution });
                }
            }
        }
    }

    let mut ranked: Vec<(usize, FusedEntry)> = order.into_iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| {
        b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal).then(ia.cmp(ib))
    });
    ranked.into_iter().map(|(_, entry)| entry).collect()
}

/// Merge two ranked lists into one list of at most `k` chunks.
///
/// The output contains no duplicate [`ChunkKey`]s.
pub fn rrf_merge(lexical: &[Chunk], semantic: &[Chunk], k: usize, rrf_k: u32) -> Vec<Chunk> {
    fuse(lexical, semantic, rrf_k).into_iter().take(k).map(|entry| entry.chunk).collect()
}
