//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RetrievalError, Result};

/// Fixed per-pipeline constants for retrieval and ranking.
///
/// These are set once when the pipeline is built, not re-specified per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Number of results in the final fused ranked list. Also the size of
    /// the lexical retriever's output.
    pub top_k: usize,
    /// Reciprocal rank fusion constant: each list contributes
    /// `1 / (rrf_k + rank)` per chunk.
    pub rrf_k: u32,
    /// Minimum best semantic similarity required to produce any grounded
    /// result. Below this the pipeline reports "insufficient evidence".
    pub min_relevance: f32,
    /// The semantic index is asked for `candidate_multiplier * top_k`
    /// nearest chunks before scope filtering.
    pub candidate_multiplier: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5, rrf_k: 60, min_relevance: 0.22, candidate_multiplier: 2 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }

    /// Number of nearest candidates requested from the semantic index.
    pub fn semantic_fetch_k(&self) -> usize {
        self.candidate_multiplier * self.top_k
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the final fused result size.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the reciprocal rank fusion constant.
    pub fn rrf_k(mut self, rrf_k: u32) -> Self {
        self.config.rrf_k = rrf_k;
        self
    }

    /// Set the minimum best semantic similarity for grounded results.
    pub fn min_relevance(mut self, threshold: f32) -> Self {
        self.config.min_relevance = threshold;
        self
    }

    /// Set the semantic candidate over-fetch multiplier.
    pub fn candidate_multiplier(mut self, multiplier: usize) -> Self {
        self.config.candidate_multiplier = multiplier;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if:
    /// - `top_k == 0`
    /// - `candidate_multiplier == 0`
    /// - `min_relevance` is outside `[0.0, 1.0]`
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.top_k == 0 {
            return Err(RetrievalError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.candidate_multiplier == 0 {
            return Err(RetrievalError::Config(
                "candidate_multiplier must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.config.min_relevance) {
            return Err(RetrievalError::Config(format!(
                "min_relevance ({}) must be within [0.0, 1.0]",
                self.config.min_relevance
            )));
        }
        Ok(self.config)
    }
}
