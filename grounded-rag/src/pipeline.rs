//! Retrieval pipeline orchestrator.
//!
//! [`RetrievalPipeline`] runs the full per-query flow: injection guard →
//! scope resolution → {lexical BM25, semantic nearest-neighbor} → relevance
//! gate → reciprocal rank fusion → citation aggregation. Construct one via
//! [`RetrievalPipeline::builder()`].
//!
//! # Example
//!
//! ```rust,ignore
//! use grounded_rag::{Corpus, RetrievalConfig, RetrievalPipeline};
//!
//! let pipeline = RetrievalPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .corpus(corpus)
//!     .semantic_index(Arc::new(index))
//!     .build()?;
//!
//! let retrieval = pipeline.retrieve("What are supply chain risks?", None).await?;
//! if retrieval.is_grounded() {
//!     println!("{}", grounded_rag::build_context(&retrieval.chunks));
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::citation::{self, Citation};
use crate::config::RetrievalConfig;
use crate::corpus::Corpus;
use crate::document::Chunk;
use crate::error::{RetrievalError, Result};
use crate::fusion::rrf_merge;
use crate::guard::InjectionGuard;
use crate::lexical::Bm25Index;
use crate::scope::{Scope, ScopeResolver};
use crate::semantic::SemanticIndex;

/// Why a retrieval produced (or withheld) grounded content.
///
/// The three empty-by-design cases render identically to an end user
/// ("no grounded answer possible") but stay observably distinct here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalStatus {
    /// Evidence was found; `chunks` and `citations` are populated.
    Grounded,
    /// The query matched an adversarial phrase; no index was consulted.
    InjectionDetected,
    /// The scoped chunk subset was empty; no index was consulted.
    ScopeEmpty,
    /// Best admissible semantic similarity fell below the configured
    /// threshold; lexical matches alone never override this.
    BelowRelevance,
}

/// The per-query output of the retrieval core: an ordered chunk list for
/// the answer-generation collaborator and grouped citations for display.
///
/// Created per query and discarded afterwards; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieval {
    /// Final fused ranked list, rank 1 first, at most `top_k` chunks.
    pub chunks: Vec<Chunk>,
    /// Grouped provenance records in presentation order.
    pub citations: Vec<Citation>,
    /// Outcome classification.
    pub status: RetrievalStatus,
}

impl Retrieval {
    fn empty(status: RetrievalStatus) -> Self {
        Self { chunks: Vec::new(), citations: Vec::new(), status }
    }

    /// Whether grounded content is available for answer generation.
    pub fn is_grounded(&self) -> bool {
        self.status == RetrievalStatus::Grounded && !self.chunks.is_empty()
    }
}

/// The hybrid retrieval pipeline.
///
/// Holds a read-only corpus snapshot and a semantic index capability; each
/// [`retrieve`](RetrievalPipeline::retrieve) call is independent, carries no
/// cross-query state, and is deterministic for a fixed corpus, query, and
/// scope.
pub struct RetrievalPipeline {
    config: RetrievalConfig,
    corpus: Corpus,
    semantic_index: Arc<dyn SemanticIndex>,
    scope_resolver: ScopeResolver,
    guard: InjectionGuard,
}

impl RetrievalPipeline {
    /// Create a new [`RetrievalPipelineBuilder`].
    pub fn builder() -> RetrievalPipelineBuilder {
        RetrievalPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Return a reference to the corpus snapshot.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Answer a query with a fused ranked chunk list and citations.
    ///
    /// `industry_filter`, when supplied, restricts every retrieval path to
    /// chunks with exactly that industry tag; otherwise scope is inferred
    /// from the query text (and may be unrestricted).
    ///
    /// # Errors
    ///
    /// Propagates semantic index and embedding failures as `Err`; an
    /// infrastructure fault is never coerced into an empty "don't know"
    /// result. The intentional empty outcomes are reported through
    /// [`RetrievalStatus`], not as errors.
    pub async fn retrieve(
        &self,
        query: &str,
        industry_filter: Option<&str>,
    ) -> Result<Retrieval> {
        if self.guard.is_injection(query) {
            warn!("query matched injection phrase list, suppressing retrieval");
            return Ok(Retrieval::empty(RetrievalStatus::InjectionDetected));
        }

        let scope = self.scope_resolver.resolve(industry_filter, query);
        let scoped = scope.filter(self.corpus.chunks());
        if scoped.is_empty() {
            info!(?scope, "scoped corpus is empty");
            return Ok(Retrieval::empty(RetrievalStatus::ScopeEmpty));
        }

        // Lexical path: BM25 over the scoped subset only, so document
        // frequencies reflect the admissible corpus.
        let lexical = Bm25Index::build(&scoped).search(query, self.config.top_k);

        // Semantic path: one nearest call feeds both the relevance gate and
        // fusion, so the gate scores exactly the candidates that may merge.
        let candidates = self
            .semantic_index
            .nearest(query, self.config.semantic_fetch_k())
            .await
            .inspect_err(|e| error!(error = %e, "semantic index search failed"))?;

        let admissible: Vec<_> =
            candidates.into_iter().filter(|c| scope.admits(&c.chunk)).collect();

        let best = admissible.iter().map(|c| c.score).fold(0.0f32, f32::max);
        if best < self.config.min_relevance {
            info!(
                best,
                threshold = self.config.min_relevance,
                "best semantic similarity below threshold, withholding answer"
            );
            return Ok(Retrieval::empty(RetrievalStatus::BelowRelevance));
        }

        let semantic: Vec<Chunk> = admissible.into_iter().map(|c| c.chunk).collect();

        let mut merged = rrf_merge(&lexical, &semantic, self.config.top_k, self.config.rrf_k);
        // Final consistency filter: zero tolerance for out-of-scope leakage,
        // whatever an upstream path admitted.
        merged.retain(|chunk| scope.admits(chunk));

        let citations = citation::aggregate(&merged);
        info!(result_count = merged.len(), citation_count = citations.len(), "query completed");

        Ok(Retrieval { chunks: merged, citations, status: RetrievalStatus::Grounded })
    }
}

/// Builder for constructing a [`RetrievalPipeline`].
///
/// `corpus` and `semantic_index` are required; configuration, scope
/// resolver, and injection guard fall back to their defaults.
#[derive(Default)]
pub struct RetrievalPipelineBuilder {
    config: Option<RetrievalConfig>,
    corpus: Option<Corpus>,
    semantic_index: Option<Arc<dyn SemanticIndex>>,
    scope_resolver: Option<ScopeResolver>,
    guard: Option<InjectionGuard>,
}

impl RetrievalPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the corpus snapshot.
    pub fn corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Set the semantic index capability.
    pub fn semantic_index(mut self, index: Arc<dyn SemanticIndex>) -> Self {
        self.semantic_index = Some(index);
        self
    }

    /// Override the industry scope resolver.
    pub fn scope_resolver(mut self, resolver: ScopeResolver) -> Self {
        self.scope_resolver = Some(resolver);
        self
    }

    /// Override the injection guard.
    pub fn guard(mut self, guard: InjectionGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Build the [`RetrievalPipeline`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if `corpus` or `semantic_index`
    /// is missing.
    pub fn build(self) -> Result<RetrievalPipeline> {
        let corpus =
            self.corpus.ok_or_else(|| RetrievalError::Config("corpus is required".to_string()))?;
        let semantic_index = self
            .semantic_index
            .ok_or_else(|| RetrievalError::Config("semantic_index is required".to_string()))?;

        Ok(RetrievalPipeline {
            config: self.config.unwrap_or_default(),
            corpus,
            semantic_index,
            scope_resolver: self.scope_resolver.unwrap_or_default(),
            guard: self.guard.unwrap_or_default(),
        })
    }
}
