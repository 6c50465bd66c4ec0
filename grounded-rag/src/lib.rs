//! # grounded-rag
//!
//! Hybrid retrieval and ranking core for question answering over a private
//! document corpus. Answers are grounded in retrieved passages with
//! per-passage provenance; when the evidence is not there, the core says so
//! instead of guessing.
//!
//! The per-query flow:
//!
//! 1. **Injection guard** — adversarial queries are suppressed before any
//!    index work ([`InjectionGuard`]).
//! 2. **Industry scoping** — an explicit filter or keyword inference derives
//!    the admissible chunk subset shared by every path ([`ScopeResolver`]).
//! 3. **Lexical retrieval** — BM25 over the scoped subset ([`Bm25Index`]).
//! 4. **Semantic retrieval + relevance gate** — nearest neighbors from a
//!    [`SemanticIndex`] capability; if the best admissible similarity is
//!    below threshold the pipeline reports insufficient evidence.
//! 5. **Reciprocal rank fusion** — both ranked lists merge into one, deduped
//!    by stable chunk identity ([`fusion::rrf_merge`]).
//! 6. **Citation aggregation** — the fused list groups into per-source
//!    provenance records ([`citation::aggregate`]).
//!
//! Document acquisition, chunking, index persistence, and answer generation
//! are external collaborators; this crate consumes chunks and a
//! [`SemanticIndex`] capability, and produces a ranked chunk list plus
//! [`Citation`] records.

pub mod citation;
pub mod config;
pub mod context;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod fusion;
pub mod guard;
pub mod inmemory;
pub mod lexical;
pub mod pipeline;
pub mod scope;
pub mod semantic;

pub use citation::{Citation, PageRef};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use context::build_context;
pub use corpus::Corpus;
pub use document::{Chunk, ChunkKey, ScoredChunk};
pub use embedding::Embedder;
pub use error::{RetrievalError, Result};
pub use guard::InjectionGuard;
pub use inmemory::InMemorySemanticIndex;
pub use lexical::Bm25Index;
pub use pipeline::{Retrieval, RetrievalPipeline, RetrievalPipelineBuilder, RetrievalStatus};
pub use scope::{Scope, ScopeResolver, default_keyword_table};
pub use semantic::SemanticIndex;
