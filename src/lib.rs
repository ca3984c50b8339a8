//! # Tilia
//!
//! A small embeddable in-memory full-text search library.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Configurable text analysis pipelines (normalizers + tokenizers)
//! - In-memory inverted index with tombstone deletes and external ids
//! - Boolean queries over a document-at-a-time iterator protocol
//! - IDF scoring with bounded top-N selection and caller rescoring
//!
//! ## Quick start
//!
//! ```
//! use std::collections::HashMap;
//! use tilia::{Document, MemoryIndex, MemoryIndexConfig, OrQuery};
//!
//! #[derive(Clone)]
//! struct City {
//!     name: &'static str,
//!     country: &'static str,
//! }
//!
//! impl Document for City {
//!     fn indexable_fields(&self) -> HashMap<String, Vec<String>> {
//!         HashMap::from([
//!             ("name".to_string(), vec![self.name.to_string()]),
//!             ("country".to_string(), vec![self.country.to_string()]),
//!         ])
//!     }
//! }
//!
//! let index = MemoryIndex::new(MemoryIndexConfig::default());
//! index.index(vec![
//!     City { name: "Amsterdam", country: "NL" },
//!     City { name: "Amsterdam, USA", country: "USA" },
//!     City { name: "London", country: "UK" },
//!     City { name: "Sofia", country: "BG" },
//! ]);
//!
//! let mut query = OrQuery::new(index.terms("name", "aMSterdam sofia"));
//! let top = index.top_n(1, &mut query);
//! assert_eq!(top.total, 3);
//! assert_eq!(top.hits.len(), 1);
//! ```

// Core modules
pub mod analysis;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

// Re-exports for the public API
pub use analysis::Analyzer;
pub use document::Document;
pub use error::{Result, TiliaError};
pub use index::{MemoryIndex, MemoryIndexConfig};
pub use query::{
    AndNotQuery, AndQuery, BoostQuery, ConstQuery, DocId, NO_MORE, OrQuery, Query, TermQuery,
};
pub use search::{Hit, SearchResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
