//! Lexical retrieval: a BM25 index rebuilt per query over the scoped subset.
//!
//! The index is deliberately query-scoped rather than persistent: it is
//! built from the admissible chunks of the current query only, so document
//! frequencies reflect the scoped subset, not the whole corpus. Corpora
//! this core targets fit comfortably in memory, which makes the rebuild
//! cheap and keeps ordering semantics trivially deterministic.

use std::collections::HashMap;

use crate::document::Chunk;

/// Term-frequency saturation parameter (standard BM25 tuning).
const K1: f32 = 1.2;
/// Length-normalization parameter (standard BM25 tuning).
const B: f32 = 0.75;

/// A BM25 ranking structure over one query's admissible chunks.
pub struct Bm25Index<'a> {
    docs: Vec<DocEntry<'a>>,
    doc_freq: HashMap<String, usize>,
    avg_len: f32,
}

struct DocEntry<'a> {
    chunk: &'a Chunk,
    term_freq: HashMap<String, usize>,
    len: usize,
}

/// Lowercase alphanumeric tokenization shared by indexing and querying.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl<'a> Bm25Index<'a> {
    /// Build an index over the given chunks. An empty slice yields an index
    /// whose searches return empty lists.
    pub fn build(chunks: &[&'a Chunk]) -> Self {
        let mut docs = Vec::with_capacity(chunks.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_len = 0usize;

        for &chunk in chunks {
            let tokens = tokenize(&chunk.content);
            let len = tokens.len();
            total_len += len;

            let mut term_freq: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                *term_freq.entry(token).or_insert(0) += 1;
            }
            for term in term_freq.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            docs.push(DocEntry { chunk, term_freq, len });
        }

        let avg_len =
            if docs.is_empty() { 0.0 } else { total_len as f32 / docs.len() as f32 };

        Self { docs, doc_freq, avg_len }
    }

    /// Return up to `k` chunks ranked by BM25 score, best first.
    ///
    /// Chunks with zero overlap with the query are not returned. Score ties
    /// break by index position so output is deterministic.
    pub fn search(&self, query: &str, k: usize) -> Vec<Chunk> {
        if self.docs.is_empty() || k == 0 {
            return Vec::new();
        }

        let query_terms = tokenize(query);
        let n = self.docs.len() as f32;

        let mut scored: Vec<(usize, f32)> = Vec::new();
        for (position, doc) in self.docs.iter().enumerate() {
            let mut score = 0.0f32;
            for term in &query_terms {
                let Some(&tf) = doc.term_freq.get(term) else { continue };
                let df = self.doc_freq.get(term).copied().unwrap_or(0) as f32;
                let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
                let tf = tf as f32;
                let norm = K1 * (1.0 - B + B * doc.len as f32 / self.avg_len.max(1.0));
                score += idf * (tf * (K1 + 1.0)) / (tf + norm);
            }
            if score > 0.0 {
                scored.push((position, score));
            }
        }

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored.into_iter().map(|(position, _)| Chunk::clone(self.docs[position].chunk)).collect()
    }
}
