//! Search result types.

use serde::{Deserialize, Serialize};

use crate::query::DocId;

/// A single ranked match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit<D> {
    /// The match score, after any caller rescoring.
    pub score: f32,
    /// The document id.
    pub id: DocId,
    /// The matched document.
    pub doc: D,
}

/// The result of a top-N search: the total number of matches and the ranked
/// hits, sorted descending by score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<D> {
    /// Total number of matching documents, regardless of the limit.
    pub total: usize,
    /// The top hits, at most `limit` of them.
    pub hits: Vec<Hit<D>>,
}
