//! Citation aggregation: grouped, deduplicated provenance per source document.

use serde::{Deserialize, Serialize};

use crate::document::Chunk;

/// One `(page, chunk_id)` reference within a [`Citation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    /// Page number, or `None` for non-paginated sources (rendered `unknown`).
    pub page: Option<u32>,
    /// Corpus-wide chunk identifier.
    pub chunk_id: u64,
}

/// Aggregated provenance for one source document in a final ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Originating document identifier.
    pub source: String,
    /// Industry tag, taken from the first chunk seen for this source.
    pub industry: String,
    /// Unique `(page, chunk_id)` pairs in first-seen order.
    pub references: Vec<PageRef>,
}

/// Group a merged chunk list into one [`Citation`] per distinct source.
///
/// Sources are collected in the order they first appear in the merged list;
/// per-source references deduplicate by `(page, chunk_id)` keeping first-seen
/// order. Records are then ordered by descending reference count, with ties
/// preserving first-encounter order. That ordering is a presentation
/// convenience, not a relevance signal.
pub fn aggregate(chunks: &[Chunk]) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::new();

    for chunk in chunks {
        let reference = PageRef { page: chunk.page, chunk_id: chunk.chunk_id };
        match citations.iter_mut().find(|c| c.source == chunk.source) {
            Some(citation) => {
                if !citation.references.contains(&reference) {
                    citation.references.push(reference);
                }
            }
            None => citations.push(Citation {
                source: chunk.source.clone(),
                industry: chunk.industry.clone(),
                references: vec![reference],
            }),
        }
    }

    // Stable sort keeps first-encounter order for equal reference counts.
    citations.sort_by(|a, b| b.references.len().cmp(&a.references.len()));
    citations
}
