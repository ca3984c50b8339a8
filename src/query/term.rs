//! Term query: a linear scan over one posting list.

use crate::query::{DocId, NO_MORE, NOT_READY, Query};

/// Iterates one `(field, term)` posting list in order, scoring each match
/// with the term's inverse document frequency.
///
/// The IDF is `ln(N / df)` with respect to the collection size the query was
/// constructed with; an unknown term (`df = 0`) yields an immediately
/// exhausted iterator scoring zero.
#[derive(Debug, Clone)]
pub struct TermQuery {
    label: String,
    postings: Vec<DocId>,
    cursor: usize,
    current: DocId,
    idf: f32,
}

impl TermQuery {
    /// Create a term query over a sorted posting list.
    ///
    /// `collection_size` is the total number of documents (live and
    /// tombstoned) in the collection at construction time.
    pub fn new(label: impl Into<String>, collection_size: usize, postings: Vec<DocId>) -> Self {
        let df = postings.len();
        let idf = if df == 0 {
            0.0
        } else {
            (collection_size as f32 / df as f32).ln()
        };
        TermQuery {
            label: label.into(),
            postings,
            cursor: 0,
            current: NOT_READY,
            idf,
        }
    }

    /// Number of documents this term occurs in.
    pub fn doc_frequency(&self) -> usize {
        self.postings.len()
    }
}

impl Query for TermQuery {
    fn advance(&mut self, target: DocId) -> DocId {
        while self.cursor < self.postings.len() && self.postings[self.cursor] < target {
            self.cursor += 1;
        }
        self.current = self.postings.get(self.cursor).copied().unwrap_or(NO_MORE);
        self.current
    }

    fn doc_id(&self) -> DocId {
        self.current
    }

    fn score(&self) -> f32 {
        self.idf
    }

    fn description(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_iteration() {
        let mut q = TermQuery::new("f:a", 10, vec![1, 3, 7]);
        assert_eq!(q.doc_id(), NOT_READY);
        assert_eq!(q.next(), 1);
        assert_eq!(q.next(), 3);
        assert_eq!(q.doc_id(), 3);
        assert_eq!(q.next(), 7);
        assert_eq!(q.next(), NO_MORE);
        assert_eq!(q.next(), NO_MORE);
    }

    #[test]
    fn test_term_advance() {
        let mut q = TermQuery::new("f:a", 10, vec![1, 3, 7, 9]);
        assert_eq!(q.advance(4), 7);
        // advancing to a target at or below the current position stays put
        assert_eq!(q.advance(2), 7);
        assert_eq!(q.advance(8), 9);
        assert_eq!(q.advance(10), NO_MORE);
    }

    #[test]
    fn test_term_idf() {
        let q = TermQuery::new("f:a", 4, vec![0, 1]);
        assert!((q.score() - (4.0f32 / 2.0).ln()).abs() < 1e-6);

        let empty = TermQuery::new("f:missing", 4, vec![]);
        assert_eq!(empty.score(), 0.0);
        assert_eq!(empty.doc_frequency(), 0);
    }

    #[test]
    fn test_empty_term_exhausts_immediately() {
        let mut q = TermQuery::new("f:missing", 4, vec![]);
        assert_eq!(q.next(), NO_MORE);
    }

    #[test]
    fn test_description() {
        let q = TermQuery::new("name:amsterdam", 4, vec![]);
        assert_eq!(q.description(), "name:amsterdam");
    }
}
