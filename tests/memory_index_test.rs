use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use tilia::{
    Analyzer, Document, MemoryIndex, MemoryIndexConfig, OrQuery, Query,
};

#[derive(Debug, Clone, Default, Serialize)]
struct City {
    name: String,
    names: Vec<String>,
    country: String,
    external_id: String,
}

impl City {
    fn named(name: &str, country: &str) -> Self {
        City {
            name: name.to_string(),
            country: country.to_string(),
            ..City::default()
        }
    }

    fn with_names(names: &[&str]) -> Self {
        City {
            names: names.iter().map(|s| s.to_string()).collect(),
            ..City::default()
        }
    }

    fn with_id(names: &[&str], external_id: &str) -> Self {
        City {
            external_id: external_id.to_string(),
            ..City::with_names(names)
        }
    }
}

impl Document for City {
    fn indexable_fields(&self) -> HashMap<String, Vec<String>> {
        let mut out = HashMap::new();
        out.insert("name".to_string(), vec![self.name.clone()]);
        out.insert("names".to_string(), self.names.clone());
        out.insert("country".to_string(), vec![self.country.clone()]);
        if !self.external_id.is_empty() {
            out.insert("_id".to_string(), vec![self.external_id.clone()]);
        }
        out
    }
}

fn count_matches(index: &MemoryIndex<City>, query: &mut dyn Query) -> usize {
    let mut n = 0;
    index.for_each(query, |_, _, _| n += 1);
    n
}

fn expect_single(index: &MemoryIndex<City>, term: &str, expected_did: i32) {
    let mut q = OrQuery::new(index.terms("names", term));
    let mut seen = Vec::new();
    index.for_each(&mut q, |did, _, _| seen.push(did));
    assert_eq!(seen, vec![expected_did], "term {term}");
}

#[test]
fn test_unique_on_index() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::with_names(&["Amsterdam", "Amsterdam"]),
        City::with_names(&["Sofia", "Sofia"]),
    ]);

    let mut q = OrQuery::new(index.terms("names", "sofia"));
    let mut seen = Vec::new();
    index.for_each(&mut q, |did, _, _| seen.push(did));
    assert_eq!(seen, vec![1]);
}

#[test]
fn test_top_n_rescoring() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::named("Amsterdam", "NL"),
        City::named("Amsterdam, USA", "USA"),
        City::named("London", "UK"),
        City::named("Sofia", "BG"),
    ]);

    let mut q = OrQuery::new(index.terms("name", "aMSterdam sofia"));
    assert_eq!(count_matches(&index, &mut q), 3);

    let mut q = OrQuery::new(index.terms("name", "aMSterdam sofia"));
    let top = index.top_n_with(1, &mut q, |_did, score, city| {
        if city.country == "NL" { score + 100.0 } else { score }
    });

    assert_eq!(top.total, 3);
    assert_eq!(top.hits.len(), 1);
    assert!(top.hits[0].score >= 100.0);
    assert_eq!(top.hits[0].doc.country, "NL");
}

#[test]
fn test_top_n_limit_zero_counts_matches() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::named("Amsterdam", "NL"),
        City::named("Amsterdam, USA", "USA"),
        City::named("London", "UK"),
        City::named("Sofia", "BG"),
    ]);

    let mut q = OrQuery::new(index.terms("name", "aMSterdam sofia"));
    let top = index.top_n(0, &mut q);
    assert_eq!(top.total, 3);
    assert!(top.hits.is_empty());
}

#[test]
fn test_top_n_is_sorted_descending_first_seen_wins() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::named("Sofia", "BG"),
        City::named("Sofia", "NL"),
        City::named("Sofia", "IS"),
        City::named("Amsterdam", "NL"),
    ]);

    // every sofia match scores the same; the first seen must stay first
    let mut q = OrQuery::new(index.terms("name", "sofia"));
    let top = index.top_n(2, &mut q);
    assert_eq!(top.total, 3);
    assert_eq!(top.hits.len(), 2);
    assert_eq!(top.hits[0].id, 0);
    assert_eq!(top.hits[1].id, 1);
    assert!(top.hits[0].score >= top.hits[1].score);

    // rescoring reorders: boost the Dutch sofia above the others
    let mut q = OrQuery::new(index.terms("name", "sofia"));
    let top = index.top_n_with(2, &mut q, |_did, score, city| {
        if city.country == "NL" { score + 10.0 } else { score }
    });
    assert_eq!(top.hits[0].id, 1);
    assert!(top.hits[0].score > top.hits[1].score);
}

#[test]
fn test_delete_then_reinsert_never_reuses_doc_ids() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::with_names(&["Amsterdam"]),
        City::with_names(&["Sofia"]),
        City::with_names(&["Paris"]),
    ]);

    expect_single(&index, "amsterdam", 0);
    expect_single(&index, "sofia", 1);
    expect_single(&index, "paris", 2);

    index.delete(1);
    assert!(index.get(1).is_none());
    let mut q = OrQuery::new(index.terms("names", "sofia"));
    assert_eq!(count_matches(&index, &mut q), 0);

    // the tombstoned slot is retained; the new document gets a fresh id
    index.index(vec![City::with_names(&["Sofia", "Sofia"])]);
    assert_eq!(index.len(), 4);
    expect_single(&index, "sofia", 3);
    expect_single(&index, "amsterdam", 0);
}

#[test]
fn test_delete_by_external_id() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![
        City::with_id(&["Amsterdam", "Amsterdam"], "a"),
        City::with_id(&["Sofia", "Sofia"], "b"),
        City::with_id(&["Paris", "Paris"], "c"),
    ]);

    expect_single(&index, "amsterdam", 0);
    expect_single(&index, "sofia", 1);
    expect_single(&index, "paris", 2);

    index.delete_by_external_id("b");
    assert!(index.get(1).is_none());
    assert!(index.get_by_external_id("b").is_none());

    let mut q = OrQuery::new(index.terms("names", "sofia"));
    assert_eq!(count_matches(&index, &mut q), 0);
    expect_single(&index, "amsterdam", 0);
    expect_single(&index, "paris", 2);
    assert_eq!(index.get_by_external_id("a").map(|c| c.external_id), Some("a".to_string()));
    assert_eq!(index.get_by_external_id("c").map(|c| c.external_id), Some("c".to_string()));

    // deleting an unknown external id is a noop
    index.delete_by_external_id("nope");
    assert_eq!(index.len(), 3);
}

#[test]
fn test_fuzzy_analyzer_roundtrip() {
    let config = MemoryIndexConfig::default().analyzer("name", Arc::new(Analyzer::fuzzy()));
    let index = MemoryIndex::new(config);
    index.index(vec![City::named("rome", "IT")]);

    let mut q = OrQuery::new(index.terms("name", "rome"));
    assert_eq!(count_matches(&index, &mut q), 1);

    // a near-miss still shares leading grams
    let mut q = OrQuery::new(index.terms("name", "roma"));
    assert_eq!(count_matches(&index, &mut q), 1);
}

#[test]
fn test_autocomplete_prefix_search() {
    let config =
        MemoryIndexConfig::default().analyzer("name", Arc::new(Analyzer::autocomplete()));
    let index = MemoryIndex::new(config);
    index.index(vec![
        City::named("Amsterdam", "NL"),
        City::named("Sofia", "BG"),
    ]);

    for prefix in ["a", "ams", "amsterdam"] {
        let mut q = OrQuery::new(index.terms("name", prefix));
        assert_eq!(count_matches(&index, &mut q), 1, "prefix {prefix}");
    }
    let mut q = OrQuery::new(index.terms("name", "amsterdamx"));
    assert_eq!(count_matches(&index, &mut q), 0);
}

#[test]
fn test_delete_soak() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let index = MemoryIndex::new(MemoryIndexConfig::default());
        let end = 100 + rng.gen_range(0..200);
        let docs: Vec<City> = (0..end)
            .map(|j| {
                let name = j.to_string();
                City::with_names(&[name.as_str(), "everything"])
            })
            .collect();
        index.index(docs);

        let expect = |term: &str, expected: usize| {
            let mut q = OrQuery::new(index.terms("names", term));
            assert_eq!(count_matches(&index, &mut q), expected, "term {term}");
        };

        let mut deleted = std::collections::HashSet::new();
        for _ in 0..50 {
            let did = rng.gen_range(0..end) as i32;
            if deleted.contains(&did) {
                continue;
            }

            expect("everything", end - deleted.len());
            index.delete(did);
            assert!(index.get(did).is_none());
            deleted.insert(did);
            expect("everything", end - deleted.len());
        }
    }
}

#[test]
fn test_concurrent_readers_and_writers() {
    let index = Arc::new(MemoryIndex::new(MemoryIndexConfig::default()));

    let writer = {
        let index = Arc::clone(&index);
        std::thread::spawn(move || {
            for i in 0..500 {
                index.index(vec![City::with_id(&["Amsterdam"], &format!("w{i}"))]);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let mut q = OrQuery::new(index.terms("names", "amsterdam"));
                    let mut previous = -1;
                    index.for_each(&mut q, |did, score, _doc| {
                        // posting order is strictly increasing, never partial
                        assert!(did > previous);
                        assert!(score >= 0.0);
                        previous = did;
                    });
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let mut q = OrQuery::new(index.terms("names", "amsterdam"));
    assert_eq!(count_matches(&index, &mut q), 500);
    assert!(index.get_by_external_id("w499").is_some());
}

#[test]
fn test_search_result_wire_shape() {
    let index = MemoryIndex::new(MemoryIndexConfig::default());
    index.index(vec![City::named("Amsterdam", "NL")]);

    let mut q = OrQuery::new(index.terms("name", "amsterdam"));
    let top = index.top_n(1, &mut q);
    let value = serde_json::to_value(&top).unwrap();

    assert!(value.get("total").is_some());
    let hits = value.get("hits").unwrap().as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].get("score").is_some());
    assert_eq!(hits[0].get("id").unwrap().as_i64(), Some(0));
    assert_eq!(
        hits[0].get("doc").unwrap().get("name").unwrap().as_str(),
        Some("Amsterdam")
    );
}
