//! Tokenizers transforming one token stream into another.
//!
//! A pipeline is seeded with a single token holding the whole (normalized)
//! input at position 0, line 0. Tokenizers are applied left-to-right, each
//! consuming the complete output of the previous stage. An empty tokenizer
//! chain yields the empty stream, not the seed.

use std::collections::HashSet;

use crate::analysis::token::Token;

/// Transforms a sequence of tokens into another sequence.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the input stream.
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token>;
}

/// Run a tokenizer chain over raw text, seeding the pipeline with a single
/// token. An empty chain yields no tokens.
pub fn tokenize(input: &str, tokenizers: &[Box<dyn Tokenizer>]) -> Vec<Token> {
    if tokenizers.is_empty() {
        return Vec::new();
    }
    let mut tokens = vec![Token::seed(input)];
    for t in tokenizers {
        tokens = t.tokenize(tokens);
    }
    tokens
}

/// Splits token text on Unicode whitespace, dropping empty splits.
///
/// Positions are assigned from a single fresh counter over the whole output;
/// the line number increments on every newline encountered while splitting.
#[derive(Debug, Default)]
pub struct Whitespace;

impl Whitespace {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        Whitespace
    }
}

impl Tokenizer for Whitespace {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::new();
        let mut position = 0;
        for token in input {
            let mut line = token.line;
            let mut word = String::new();
            for c in token.text.chars() {
                if c.is_whitespace() {
                    if !word.is_empty() {
                        out.push(Token::new(std::mem::take(&mut word), position, line));
                        position += 1;
                    }
                    if c == '\n' {
                        line += 1;
                    }
                } else {
                    word.push(c);
                }
            }
            if !word.is_empty() {
                out.push(Token::new(word, position, line));
                position += 1;
            }
        }
        out
    }
}

/// Emits overlapping character n-grams of each token.
///
/// Tokens of length `n` or shorter pass through unchanged as a single
/// output.
#[derive(Debug)]
pub struct CharNgram {
    n: usize,
}

impl CharNgram {
    /// Create an n-gram tokenizer of the given gram length.
    pub fn new(n: usize) -> Self {
        debug_assert!(n > 0, "gram length must be positive");
        CharNgram { n }
    }
}

impl Tokenizer for CharNgram {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::new();
        for token in input {
            let chars: Vec<char> = token.text.chars().collect();
            if chars.len() <= self.n {
                out.push(token);
                continue;
            }
            for start in 0..=chars.len() - self.n {
                let gram: String = chars[start..start + self.n].iter().collect();
                out.push(token.with_text(gram));
            }
        }
        out
    }
}

/// Emits the left-edge prefixes of each token, from `min` characters up to
/// the full token. Tokens shorter than `min` pass through whole.
#[derive(Debug)]
pub struct LeftEdge {
    min: usize,
}

impl LeftEdge {
    /// Create a left-edge tokenizer with the given minimum prefix length.
    pub fn new(min: usize) -> Self {
        debug_assert!(min > 0, "minimum prefix length must be positive");
        LeftEdge { min }
    }
}

impl Tokenizer for LeftEdge {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::new();
        for token in input {
            let chars: Vec<char> = token.text.chars().collect();
            if chars.len() < self.min {
                out.push(token);
                continue;
            }
            for end in self.min..=chars.len() {
                let prefix: String = chars[..end].iter().collect();
                out.push(token.with_text(prefix));
            }
        }
        out
    }
}

/// Emits each token followed by the concatenation of the `n` consecutive
/// tokens starting at it, when that window is complete.
///
/// `Shingles(3)` on `new york city killa gorilla` yields
/// `new, newyorkcity, york, yorkcitykilla, city, citykillagorilla, killa,
/// gorilla`. With `n ≤ 1` the stream passes through unchanged.
#[derive(Debug)]
pub struct Shingles {
    n: usize,
}

impl Shingles {
    /// Create a shingle tokenizer over windows of `n` tokens.
    pub fn new(n: usize) -> Self {
        debug_assert!(n > 0, "window size must be positive");
        Shingles { n }
    }
}

impl Tokenizer for Shingles {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        if self.n <= 1 {
            return input;
        }
        let mut out = Vec::new();
        for i in 0..input.len() {
            out.push(input[i].clone());
            if i + self.n <= input.len() {
                let shingle: String = input[i..i + self.n]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect();
                out.push(input[i].with_text(shingle));
            }
        }
        out
    }
}

/// Prepends a marker to the first token and appends it to the last; a single
/// token receives both. Empty input stays empty.
#[derive(Debug)]
pub struct Surround {
    marker: String,
}

impl Surround {
    /// Create a surround tokenizer with the given marker string.
    pub fn new(marker: impl Into<String>) -> Self {
        Surround {
            marker: marker.into(),
        }
    }
}

impl Tokenizer for Surround {
    fn tokenize(&self, mut input: Vec<Token>) -> Vec<Token> {
        if let Some(first) = input.first_mut() {
            first.text = format!("{}{}", self.marker, first.text);
        }
        if let Some(last) = input.last_mut() {
            last.text.push_str(&self.marker);
        }
        input
    }
}

/// Replaces each token's text with its American Soundex code: one letter
/// followed by three digits.
#[derive(Debug, Default)]
pub struct Soundex;

impl Soundex {
    /// Create a new soundex tokenizer.
    pub fn new() -> Self {
        Soundex
    }

    fn digit(c: char) -> Option<char> {
        match c {
            'b' | 'f' | 'p' | 'v' => Some('1'),
            'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some('2'),
            'd' | 't' => Some('3'),
            'l' => Some('4'),
            'm' | 'n' => Some('5'),
            'r' => Some('6'),
            _ => None,
        }
    }

    fn encode(word: &str) -> String {
        let mut chars = word.chars().map(|c| c.to_ascii_lowercase());
        let Some(first) = chars.next() else {
            return String::new();
        };
        let mut out = String::with_capacity(4);
        out.push(first.to_ascii_uppercase());
        let mut last = Self::digit(first);
        for c in chars {
            match c {
                // h and w are transparent
                'h' | 'w' => {}
                'a' | 'e' | 'i' | 'o' | 'u' | 'y' => {
                    last = None;
                }
                _ => {
                    if let Some(d) = Self::digit(c) {
                        if last != Some(d) {
                            out.push(d);
                            if out.len() == 4 {
                                break;
                            }
                        }
                        last = Some(d);
                    } else {
                        last = None;
                    }
                }
            }
        }
        while out.len() < 4 {
            out.push('0');
        }
        out
    }
}

impl Tokenizer for Soundex {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        input
            .into_iter()
            .map(|t| {
                let code = Self::encode(&t.text);
                t.with_text(code)
            })
            .collect()
    }
}

/// Deduplicates tokens by text, keeping the first occurrence and its
/// position and line.
#[derive(Debug, Default)]
pub struct Unique;

impl Unique {
    /// Create a new unique tokenizer.
    pub fn new() -> Self {
        Unique
    }
}

impl Tokenizer for Unique {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        let mut seen = HashSet::new();
        input
            .into_iter()
            .filter(|t| seen.insert(t.text.clone()))
            .collect()
    }
}

/// Identity tokenizer.
#[derive(Debug, Default)]
pub struct Noop;

impl Noop {
    /// Create a new noop tokenizer.
    pub fn new() -> Self {
        Noop
    }
}

impl Tokenizer for Noop {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        input
    }
}

/// Wraps a user-supplied token transformation.
pub struct Custom {
    f: Box<dyn Fn(Vec<Token>) -> Vec<Token> + Send + Sync>,
}

impl Custom {
    /// Create a tokenizer from a closure.
    pub fn new(f: impl Fn(Vec<Token>) -> Vec<Token> + Send + Sync + 'static) -> Self {
        Custom { f: Box::new(f) }
    }
}

impl std::fmt::Debug for Custom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custom").finish_non_exhaustive()
    }
}

impl Tokenizer for Custom {
    fn tokenize(&self, input: Vec<Token>) -> Vec<Token> {
        (self.f)(input)
    }
}
