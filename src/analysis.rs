//! Text analysis module for tilia.
//!
//! This module provides the text analysis pipeline that turns raw field
//! values into index terms:
//!
//! - **Normalizers**: string-to-string transformations applied before
//!   tokenization (lowercasing, unaccenting, cleanup)
//! - **Tokenizers**: transform a token stream into another token stream
//!   (whitespace split, n-grams, prefixes, shingles, soundex)
//! - **Analyzers**: named compositions of normalizers and tokenizer chains
//!   with separate index and search paths
//!
//! # Architecture
//!
//! ```text
//! Text → Normalizers → Seed Token → Tokenizer Chain → Terms
//! ```
//!
//! The vocabulary contract between indexing and querying is that a query
//! matches a value when `analyze_search(query)` tokens are contained in the
//! `analyze_index(value)` tokens, under whichever boolean the caller
//! composes.
//!
//! # Examples
//!
//! ```
//! use tilia::analysis::Analyzer;
//!
//! let analyzer = Analyzer::standard();
//! let tokens = analyzer.analyze_index("Hello, World!");
//! assert_eq!(tokens, vec!["hello", "world"]);
//! ```

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod tokenizer;

// Re-exports
pub use analyzer::Analyzer;
pub use normalizer::Normalizer;
pub use token::Token;
pub use tokenizer::Tokenizer;
