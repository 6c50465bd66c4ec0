//! Grounding-context formatting for the answer-generation collaborator.
//!
//! The retrieval core hands the generation step an ordered chunk list; this
//! module renders that list into the context block format the generator
//! consumes. Generation itself (prompting, refusal wording) stays outside
//! the core.

use std::fmt::Write;

use crate::document::Chunk;

/// Render a merged chunk list as a grounding context string.
///
/// Each chunk becomes a block headed by
/// `SOURCE: {source} | page={page} | chunk={chunk_id}` (page renders as
/// `unknown` for non-paginated sources), blocks separated by `---` rules.
pub fn build_context(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n---\n\n");
        }
        let page = match chunk.page {
            Some(page) => page.to_string(),
            None => "unknown".to_string(),
        };
        let _ = write!(out, "SOURCE: {} | page={page} | chunk={}", chunk.source, chunk.chunk_id);
        out.push('\n');
        out.push_str(&chunk.content);
    }
    out
}
