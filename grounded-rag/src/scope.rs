//! Industry scoping: the single admissibility predicate shared by every
//! retrieval path.
//!
//! A query's scope comes either from an explicit industry filter (exact tag
//! match) or, absent one, from heuristic inference over the query text using
//! a fixed, ordered keyword table. The resulting [`Scope`] predicate is
//! applied identically to the lexical corpus, the semantic candidates, the
//! relevance-gate computation, and once more to the fused list.

use serde::{Deserialize, Serialize};

use crate::document::Chunk;

/// The admissible chunk subset for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// No restriction: every chunk is admissible.
    Unrestricted,
    /// Union admissibility over one or more industry labels, in the order
    /// they were derived (explicit filter first, or table order).
    Industries(Vec<String>),
}

impl Scope {
    /// Whether a chunk is admissible under this scope.
    pub fn admits(&self, chunk: &Chunk) -> bool {
        match self {
            Scope::Unrestricted => true,
            Scope::Industries(labels) => labels.iter().any(|label| *label == chunk.industry),
        }
    }

    /// Filter a chunk slice down to the admissible subset, preserving order.
    pub fn filter<'a>(&self, chunks: &'a [Chunk]) -> Vec<&'a Chunk> {
        chunks.iter().filter(|c| self.admits(c)).collect()
    }
}

/// Derives the [`Scope`] for a query from an explicit filter or from the
/// keyword table.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    /// Ordered `(label, phrases)` table. Phrases are matched as
    /// case-insensitive substrings of the query.
    table: Vec<(String, Vec<String>)>,
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new(default_keyword_table())
    }
}

impl ScopeResolver {
    /// Create a resolver with a custom keyword table. Table order determines
    /// the order labels are inferred in.
    pub fn new(table: Vec<(String, Vec<String>)>) -> Self {
        Self { table }
    }

    /// Resolve the scope for one query.
    ///
    /// An explicit filter wins outright and is matched exactly against
    /// `Chunk::industry`. Otherwise each label whose phrase list hits the
    /// lowercased query is inferred, in table order, without duplicates.
    /// No filter and no hits means no restriction.
    pub fn resolve(&self, explicit: Option<&str>, query: &str) -> Scope {
        if let Some(filter) = explicit {
            return Scope::Industries(vec![filter.to_string()]);
        }

        let lowered = query.to_lowercase();
        let mut inferred: Vec<String> = Vec::new();
        for (label, phrases) in &self.table {
            if inferred.iter().any(|l| l == label) {
                continue;
            }
            if phrases.iter().any(|p| lowered.contains(p.as_str())) {
                inferred.push(label.clone());
            }
        }

        if inferred.is_empty() {
            Scope::Unrestricted
        } else {
            Scope::Industries(inferred)
        }
    }
}

/// The built-in keyword table covering the ten industries of the document
/// corpus. Phrases are lowercase; matching is substring-based, so short
/// generic words are deliberately avoided.
pub fn default_keyword_table() -> Vec<(String, Vec<String>)> {
    let table: [(&str, &[&str]); 10] = [
        ("banking", &["bank", "lending", "loan", "deposit", "kyc", "anti-money"]),
        (
            "insurance",
            &["insurance", "insurer", "underwriting", "claims", "policyholder", "actuarial"],
        ),
        ("healthcare", &["healthcare", "hospital", "patient", "clinical care", "payer"]),
        (
            "lifesciences",
            &["life sciences", "pharma", "biotech", "clinical trial", "drug discovery"],
        ),
        (
            "manufacturing",
            &["manufacturing", "factory", "supply chain", "procurement", "shop floor"],
        ),
        ("hightech", &["high tech", "hightech", "saas", "semiconductor", "software company"]),
        ("comms", &["telecom", "telco", "broadband", "carrier", "media company"]),
        ("energy", &["energy", "utilities", "oil and gas", "renewable", "power grid"]),
        ("retail", &["retail", "e-commerce", "ecommerce", "merchandising", "consumer goods"]),
        ("privateequity", &["private equity", "buyout", "portfolio company", "due diligence"]),
    ];

    table
        .into_iter()
        .map(|(label, phrases)| {
            (label.to_string(), phrases.iter().map(|p| (*p).to_string()).collect())
        })
        .collect()
}
