//! In-memory inverted index.

use std::collections::HashMap;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::analysis::Analyzer;
use crate::document::Document;
use crate::query::{DocId, NO_MORE, OrQuery, Query, TermQuery};
use crate::search::{Hit, SearchResult};

/// Configuration for a [`MemoryIndex`].
#[derive(Debug)]
pub struct MemoryIndexConfig {
    /// Name of the field holding caller-chosen external ids.
    pub id_field: String,
    /// Per-field analyzers. Fields without an entry use the keyword
    /// analyzer when id-shaped (`id_field`, `id`, `uuid`) and the standard
    /// analyzer otherwise.
    pub per_field: HashMap<String, Arc<Analyzer>>,
}

impl Default for MemoryIndexConfig {
    fn default() -> Self {
        MemoryIndexConfig {
            id_field: "_id".to_string(),
            per_field: HashMap::new(),
        }
    }
}

impl MemoryIndexConfig {
    /// Set the external-id field name.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Register an analyzer for a field.
    pub fn analyzer(mut self, field: impl Into<String>, analyzer: Arc<Analyzer>) -> Self {
        self.per_field.insert(field.into(), analyzer);
        self
    }
}

/// All mutable state, guarded by one readers-writer lock.
struct IndexState<D> {
    /// Forward store indexed by DocID. `None` marks a tombstone; the slot is
    /// retained so DocIDs stay stable.
    forward: Vec<Option<D>>,
    /// External id to DocID, for live documents only.
    forward_by_id: AHashMap<String, DocId>,
    /// field -> term -> ascending posting list.
    postings: AHashMap<String, AHashMap<String, Vec<DocId>>>,
}

/// An in-memory inverted index over caller-supplied documents.
///
/// Documents are assigned dense, monotonically increasing DocIDs on insert;
/// a deleted document leaves a tombstone behind and its DocID is never
/// reused. Per-field posting lists are kept strictly increasing. Writers
/// (`index`, `delete`, `delete_by_external_id`) take the write lock;
/// readers snapshot what they return under the read lock.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tilia::{Document, MemoryIndex, MemoryIndexConfig, OrQuery};
///
/// struct City {
///     name: &'static str,
///     country: &'static str,
/// }
///
/// impl Document for City {
///     fn indexable_fields(&self) -> HashMap<String, Vec<String>> {
///         HashMap::from([
///             ("name".to_string(), vec![self.name.to_string()]),
///             ("country".to_string(), vec![self.country.to_string()]),
///         ])
///     }
/// }
///
/// let index = MemoryIndex::new(MemoryIndexConfig::default());
/// index.index(vec![
///     City { name: "Amsterdam", country: "NL" },
///     City { name: "Sofia", country: "BG" },
/// ]);
///
/// let mut query = OrQuery::new(index.terms("name", "aMSterdam sofia"));
/// let mut matches = 0;
/// index.for_each(&mut query, |_did, _score, _doc| matches += 1);
/// assert_eq!(matches, 2);
/// ```
pub struct MemoryIndex<D> {
    state: RwLock<IndexState<D>>,
    per_field: HashMap<String, Arc<Analyzer>>,
    id_field: String,
    standard: Arc<Analyzer>,
    keyword: Arc<Analyzer>,
}

impl<D: Document> Default for MemoryIndex<D> {
    fn default() -> Self {
        MemoryIndex::new(MemoryIndexConfig::default())
    }
}

impl<D: Document> MemoryIndex<D> {
    /// Create a new in-memory index.
    pub fn new(config: MemoryIndexConfig) -> Self {
        MemoryIndex {
            state: RwLock::new(IndexState {
                forward: Vec::new(),
                forward_by_id: AHashMap::new(),
                postings: AHashMap::new(),
            }),
            per_field: config.per_field,
            id_field: config.id_field,
            standard: Arc::new(Analyzer::standard()),
            keyword: Arc::new(Analyzer::keyword()),
        }
    }

    /// Number of document slots, tombstones included.
    pub fn len(&self) -> usize {
        self.state.read().forward.len()
    }

    /// Whether the index has no document slots at all.
    pub fn is_empty(&self) -> bool {
        self.state.read().forward.is_empty()
    }

    /// Analyzer used on the index and delete paths: per-field registration,
    /// then the keyword analyzer for id-shaped fields, then standard.
    fn index_analyzer(&self, field: &str) -> &Analyzer {
        if let Some(analyzer) = self.per_field.get(field) {
            return analyzer;
        }
        if field == self.id_field || field == "id" || field == "uuid" {
            &self.keyword
        } else {
            &self.standard
        }
    }

    /// Analyzer used on the search path. Unlike [`Self::index_analyzer`]
    /// this never falls back to the keyword analyzer for id-shaped field
    /// names; register one in `per_field` to search such fields verbatim.
    fn search_analyzer(&self, field: &str) -> &Analyzer {
        self.per_field
            .get(field)
            .map(Arc::as_ref)
            .unwrap_or(&self.standard)
    }

    /// Index a batch of documents, assigning each the next DocID.
    pub fn index(&self, docs: impl IntoIterator<Item = D>) {
        let mut state = self.state.write();
        for doc in docs {
            let fields = doc.indexable_fields();
            let did = state.forward.len() as DocId;
            state.forward.push(Some(doc));

            for (field, values) in &fields {
                if *field == self.id_field {
                    for value in values {
                        state.forward_by_id.insert(value.clone(), did);
                    }
                }

                let analyzer = self.index_analyzer(field);
                for value in values {
                    for term in analyzer.analyze_index(value) {
                        Self::add_posting(&mut state.postings, field, term, did);
                    }
                }
            }
        }
    }

    /// Append `did` to a posting list, keeping the list strictly increasing
    /// by suppressing the append when the tail already holds `did`.
    fn add_posting(
        postings: &mut AHashMap<String, AHashMap<String, Vec<DocId>>>,
        field: &str,
        term: String,
        did: DocId,
    ) {
        let by_term = postings.entry(field.to_string()).or_default();
        let list = by_term.entry(term).or_default();
        debug_assert!(list.last().is_none_or(|&tail| tail <= did));
        if list.last() != Some(&did) {
            list.push(did);
        }
    }

    fn remove_posting(
        postings: &mut AHashMap<String, AHashMap<String, Vec<DocId>>>,
        field: &str,
        term: &str,
        did: DocId,
    ) {
        let Some(by_term) = postings.get_mut(field) else {
            return;
        };
        let Some(list) = by_term.get_mut(term) else {
            return;
        };
        if let Ok(pos) = list.binary_search(&did) {
            list.remove(pos);
        }
    }

    /// Delete a document by DocID, leaving a tombstone in its slot.
    ///
    /// Out-of-range and already-tombstoned DocIDs are a noop.
    pub fn delete(&self, did: DocId) {
        let mut state = self.state.write();
        self.delete_locked(&mut state, did);
    }

    /// Delete the document carrying the given external id, if any.
    pub fn delete_by_external_id(&self, external_id: &str) {
        let mut state = self.state.write();
        if let Some(did) = state.forward_by_id.get(external_id).copied() {
            self.delete_locked(&mut state, did);
        }
    }

    fn delete_locked(&self, state: &mut IndexState<D>, did: DocId) {
        if did < 0 {
            return;
        }
        let fields = match state.forward.get(did as usize) {
            Some(Some(doc)) => doc.indexable_fields(),
            _ => return,
        };

        for (field, values) in &fields {
            if *field == self.id_field {
                for value in values {
                    state.forward_by_id.remove(value);
                }
            }

            let analyzer = self.index_analyzer(field);
            for value in values {
                for term in analyzer.analyze_index(value) {
                    Self::remove_posting(&mut state.postings, field, &term, did);
                }
            }
        }

        state.forward[did as usize] = None;
    }

    /// Get a document by DocID. Returns `None` for out-of-range or
    /// tombstoned slots.
    pub fn get(&self, did: DocId) -> Option<D>
    where
        D: Clone,
    {
        if did < 0 {
            return None;
        }
        let state = self.state.read();
        state.forward.get(did as usize).and_then(|slot| slot.clone())
    }

    /// Get a document by external id.
    pub fn get_by_external_id(&self, external_id: &str) -> Option<D>
    where
        D: Clone,
    {
        let state = self.state.read();
        let did = *state.forward_by_id.get(external_id)?;
        state.forward.get(did as usize).and_then(|slot| slot.clone())
    }

    /// Build one term query per token of `text` under the field's search
    /// analyzer, ready to be composed with the boolean combinators.
    pub fn terms(&self, field: &str, text: &str) -> Vec<Box<dyn Query>> {
        self.search_analyzer(field)
            .analyze_search(text)
            .into_iter()
            .map(|term| self.term_query(field, &term))
            .collect()
    }

    /// Build a term query for an already-analyzed term.
    ///
    /// The posting list is copied under the read lock; the iterator is
    /// constructed after the lock is released and never observes later
    /// mutations.
    pub fn term_query(&self, field: &str, term: &str) -> Box<dyn Query> {
        let (collection_size, postings) = {
            let state = self.state.read();
            let list = state
                .postings
                .get(field)
                .and_then(|by_term| by_term.get(term))
                .cloned()
                .unwrap_or_default();
            (state.forward.len(), list)
        };
        Box::new(TermQuery::new(
            format!("{field}:{term}"),
            collection_size,
            postings,
        ))
    }

    /// Factory hook for query-expression parsers: analyze `text` for the
    /// field and return a single term query, an OR over several, or an
    /// always-empty query when no tokens emerge.
    pub fn make_query(&self, field: &str, text: &str) -> Box<dyn Query> {
        let mut queries = self.terms(field, text);
        if queries.len() == 1 {
            queries.remove(0)
        } else {
            Box::new(OrQuery::new(queries))
        }
    }

    /// Drive a query and invoke the callback for every live match with its
    /// DocID, score, and document. Tombstoned slots are skipped.
    ///
    /// The read guard is held for the whole iteration: writers block until
    /// it completes, and the callback must not call write methods on the
    /// same index.
    pub fn for_each<F>(&self, query: &mut dyn Query, mut callback: F)
    where
        F: FnMut(DocId, f32, &D),
    {
        let state = self.state.read();
        while query.next() != NO_MORE {
            let did = query.doc_id();
            let Some(doc) = state.forward.get(did as usize).and_then(|slot| slot.as_ref())
            else {
                continue;
            };
            callback(did, query.score(), doc);
        }
    }

    /// Collect the top `limit` matches by score, descending, ties broken
    /// first-seen. `total` counts every match even when `limit` is zero.
    pub fn top_n(&self, limit: usize, query: &mut dyn Query) -> SearchResult<D>
    where
        D: Clone,
    {
        self.collect_top_n(limit, query, None)
    }

    /// Like [`Self::top_n`], but every match's score is replaced by
    /// `rescore(did, score, doc)` before selection.
    pub fn top_n_with<F>(&self, limit: usize, query: &mut dyn Query, mut rescore: F) -> SearchResult<D>
    where
        D: Clone,
        F: FnMut(DocId, f32, &D) -> f32,
    {
        self.collect_top_n(limit, query, Some(&mut rescore))
    }

    fn collect_top_n(
        &self,
        limit: usize,
        query: &mut dyn Query,
        mut rescore: Option<&mut dyn FnMut(DocId, f32, &D) -> f32>,
    ) -> SearchResult<D>
    where
        D: Clone,
    {
        let mut total = 0;
        let mut hits: Vec<Hit<D>> = Vec::new();

        self.for_each(query, |did, base_score, doc| {
            total += 1;
            if limit == 0 {
                return;
            }

            let score = match rescore.as_mut() {
                Some(f) => f(did, base_score, doc),
                None => base_score,
            };

            // an equal score never displaces an incumbent
            if hits.len() == limit && hits.last().is_some_and(|last| last.score >= score) {
                return;
            }

            let pos = hits
                .iter()
                .position(|hit| hit.score < score)
                .unwrap_or(hits.len());
            hits.insert(
                pos,
                Hit {
                    score,
                    id: did,
                    doc: doc.clone(),
                },
            );
            if hits.len() > limit {
                hits.pop();
            }
        });

        SearchResult { total, hits }
    }
}
