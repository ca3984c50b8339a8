//! Analyzers: named compositions of normalizers and tokenizer chains.

use crate::analysis::normalizer::{
    self, Cleanup, Lowercase, Noop as NoopNormalizer, Normalizer, SpaceBetweenDigits, Trim,
    Unaccent,
};
use crate::analysis::tokenizer::{
    self, CharNgram, LeftEdge, Noop as NoopTokenizer, Soundex, Surround, Tokenizer, Unique,
    Whitespace,
};

/// An analyzer bundles a normalizer chain with two tokenizer chains: one for
/// the index path and one for the search path.
///
/// Indexing and querying agree on a vocabulary through the analyzer: a query
/// token matches a value when it also appears among the value's index
/// tokens.
///
/// # Examples
///
/// ```
/// use tilia::analysis::Analyzer;
///
/// let fuzzy = Analyzer::fuzzy();
/// assert_eq!(fuzzy.analyze_index("rome"), vec!["$ro", "om", "me$"]);
/// ```
pub struct Analyzer {
    normalizers: Vec<Box<dyn Normalizer>>,
    search_tokenizers: Vec<Box<dyn Tokenizer>>,
    index_tokenizers: Vec<Box<dyn Tokenizer>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("normalizers", &self.normalizers.len())
            .field("search_tokenizers", &self.search_tokenizers.len())
            .field("index_tokenizers", &self.index_tokenizers.len())
            .finish()
    }
}

/// The normalizer chain shared by the standard analyzers: unaccent,
/// lowercase, space-between-digits, cleanup, trim.
pub fn standard_normalizers() -> Vec<Box<dyn Normalizer>> {
    vec![
        Box::new(Unaccent::new()),
        Box::new(Lowercase::new()),
        Box::new(SpaceBetweenDigits::new()),
        Box::new(Cleanup::basic_non_alphanumeric()),
        Box::new(Trim::new(" ")),
    ]
}

impl Analyzer {
    /// Create an analyzer from a normalizer chain and separate search/index
    /// tokenizer chains.
    pub fn new(
        normalizers: Vec<Box<dyn Normalizer>>,
        search_tokenizers: Vec<Box<dyn Tokenizer>>,
        index_tokenizers: Vec<Box<dyn Tokenizer>>,
    ) -> Self {
        Analyzer {
            normalizers,
            search_tokenizers,
            index_tokenizers,
        }
    }

    /// The standard analyzer: standard normalizers with whitespace
    /// tokenization on both paths.
    pub fn standard() -> Self {
        Analyzer::new(
            standard_normalizers(),
            vec![Box::new(Whitespace::new())],
            vec![Box::new(Whitespace::new())],
        )
    }

    /// The keyword analyzer: the whole value is a single token,
    /// byte-for-byte. Used for identifier fields.
    pub fn keyword() -> Self {
        Analyzer::new(
            vec![Box::new(NoopNormalizer::new())],
            vec![Box::new(NoopTokenizer::new())],
            vec![Box::new(NoopTokenizer::new())],
        )
    }

    /// The soundex analyzer: standard normalizers, whitespace split, then
    /// each token replaced by its phonetic code.
    ///
    /// <https://en.wikipedia.org/wiki/Soundex>
    pub fn soundex() -> Self {
        let chain = || -> Vec<Box<dyn Tokenizer>> {
            vec![Box::new(Whitespace::new()), Box::new(Soundex::new())]
        };
        Analyzer::new(standard_normalizers(), chain(), chain())
    }

    /// The fuzzy analyzer: character 2-grams, deduplicated, with `$` edge
    /// markers, on both paths.
    pub fn fuzzy() -> Self {
        let chain = || -> Vec<Box<dyn Tokenizer>> {
            vec![
                Box::new(Whitespace::new()),
                Box::new(CharNgram::new(2)),
                Box::new(Unique::new()),
                Box::new(Surround::new("$")),
            ]
        };
        Analyzer::new(standard_normalizers(), chain(), chain())
    }

    /// The autocomplete analyzer: searches match plain words, the index
    /// additionally stores every left-edge prefix.
    pub fn autocomplete() -> Self {
        Analyzer::new(
            standard_normalizers(),
            vec![Box::new(Whitespace::new())],
            vec![Box::new(Whitespace::new()), Box::new(LeftEdge::new(1))],
        )
    }

    /// Analyze text for the index path.
    pub fn analyze_index(&self, text: &str) -> Vec<String> {
        self.analyze(text, &self.index_tokenizers)
    }

    /// Analyze text for the search path.
    pub fn analyze_search(&self, text: &str) -> Vec<String> {
        self.analyze(text, &self.search_tokenizers)
    }

    fn analyze(&self, text: &str, tokenizers: &[Box<dyn Tokenizer>]) -> Vec<String> {
        let normalized = normalizer::normalize(text, &self.normalizers);
        tokenizer::tokenize(&normalized, tokenizers)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_analyzer() {
        let a = Analyzer::standard();
        assert_eq!(a.analyze_index("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(a.analyze_search("Amsterdam"), vec!["amsterdam"]);
        // index and search paths share the vocabulary
        assert_eq!(a.analyze_index("Amsterdam"), a.analyze_search("Amsterdam"));
    }

    #[test]
    fn test_standard_analyzer_digits() {
        let a = Analyzer::standard();
        assert_eq!(a.analyze_index("route 66"), vec!["route", "6", "6"]);
    }

    #[test]
    fn test_keyword_analyzer() {
        let a = Analyzer::keyword();
        assert_eq!(
            a.analyze_index("Exact Value, Untouched!"),
            vec!["Exact Value, Untouched!"]
        );
        assert_eq!(a.analyze_search("x-1"), vec!["x-1"]);
    }

    #[test]
    fn test_soundex_analyzer() {
        let a = Analyzer::soundex();
        assert_eq!(a.analyze_index("hello hallo"), vec!["H400", "H400"]);
        assert_eq!(a.analyze_search("warld"), a.analyze_index("world"));
    }

    #[test]
    fn test_fuzzy_analyzer() {
        let a = Analyzer::fuzzy();
        assert_eq!(a.analyze_index("rome"), vec!["$ro", "om", "me$"]);
        assert_eq!(a.analyze_search("rome"), a.analyze_index("rome"));
    }

    #[test]
    fn test_autocomplete_analyzer() {
        let a = Analyzer::autocomplete();
        assert_eq!(
            a.analyze_index("ams"),
            vec!["a", "am", "ams"]
        );
        assert_eq!(a.analyze_search("ams"), vec!["ams"]);
    }
}
