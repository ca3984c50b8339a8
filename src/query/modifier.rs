//! Score-modifying query wrappers.

use crate::query::{DocId, Query};

/// Emits a fixed score for every document the inner query matches.
pub struct ConstQuery {
    inner: Box<dyn Query>,
    score: f32,
}

impl ConstQuery {
    /// Wrap a query, replacing its scores with a constant.
    pub fn new(inner: Box<dyn Query>, score: f32) -> Self {
        ConstQuery { inner, score }
    }
}

impl Query for ConstQuery {
    fn advance(&mut self, target: DocId) -> DocId {
        self.inner.advance(target)
    }

    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn score(&self) -> f32 {
        self.score
    }

    fn description(&self) -> String {
        format!("CONST({}, {})", self.score, self.inner.description())
    }
}

/// Multiplies the inner query's score by a constant factor.
pub struct BoostQuery {
    inner: Box<dyn Query>,
    factor: f32,
}

impl BoostQuery {
    /// Wrap a query, scaling its scores by `factor`.
    pub fn new(inner: Box<dyn Query>, factor: f32) -> Self {
        BoostQuery { inner, factor }
    }
}

impl Query for BoostQuery {
    fn advance(&mut self, target: DocId) -> DocId {
        self.inner.advance(target)
    }

    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn score(&self) -> f32 {
        self.inner.score() * self.factor
    }

    fn description(&self) -> String {
        format!("{}^{}", self.inner.description(), self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::term::TermQuery;
    use crate::query::NO_MORE;

    #[test]
    fn test_const_query() {
        let inner = Box::new(TermQuery::new("f:a", 10, vec![1, 4]));
        let mut q = ConstQuery::new(inner, 1.5);
        assert_eq!(q.next(), 1);
        assert_eq!(q.score(), 1.5);
        assert_eq!(q.next(), 4);
        assert_eq!(q.score(), 1.5);
        assert_eq!(q.next(), NO_MORE);
    }

    #[test]
    fn test_boost_query() {
        let inner = Box::new(TermQuery::new("f:a", 10, vec![2]));
        let idf = (10.0f32 / 1.0).ln();
        let mut q = BoostQuery::new(inner, 2.0);
        assert_eq!(q.next(), 2);
        assert!((q.score() - idf * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_description() {
        let q = BoostQuery::new(Box::new(TermQuery::new("f:a", 1, vec![])), 2.0);
        assert_eq!(q.description(), "f:a^2");
    }
}
