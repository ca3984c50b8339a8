//! String normalizers applied before tokenization.
//!
//! A normalizer is a pure string-to-string transformation. Normalizers are
//! chained in order; an empty chain is the identity.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{Result, TiliaError};

/// A pure string-to-string transformation applied before tokenization.
pub trait Normalizer: Send + Sync {
    /// Normalize the input string.
    fn normalize(&self, input: &str) -> String;
}

/// Apply a normalizer chain in order. An empty chain returns the input
/// unchanged.
pub fn normalize(input: &str, normalizers: &[Box<dyn Normalizer>]) -> String {
    let mut out = input.to_string();
    for n in normalizers {
        out = n.normalize(&out);
    }
    out
}

/// Unicode-aware lowercasing.
#[derive(Debug, Default)]
pub struct Lowercase;

impl Lowercase {
    /// Create a new lowercase normalizer.
    pub fn new() -> Self {
        Lowercase
    }
}

impl Normalizer for Lowercase {
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }
}

/// Strips combining diacritics: NFD decomposition followed by removal of
/// combining-mark codepoints.
#[derive(Debug, Default)]
pub struct Unaccent;

impl Unaccent {
    /// Create a new unaccent normalizer.
    pub fn new() -> Self {
        Unaccent
    }
}

impl Normalizer for Unaccent {
    fn normalize(&self, input: &str) -> String {
        input.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }
}

/// Inserts a single space between any two adjacent decimal digits, so that
/// digit sequences tokenize one digit at a time.
#[derive(Debug, Default)]
pub struct SpaceBetweenDigits;

impl SpaceBetweenDigits {
    /// Create a new space-between-digits normalizer.
    pub fn new() -> Self {
        SpaceBetweenDigits
    }
}

impl Normalizer for SpaceBetweenDigits {
    fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut prev_was_digit = false;
        for c in input.chars() {
            let is_digit = c.is_ascii_digit();
            if is_digit && prev_was_digit {
                out.push(' ');
            }
            out.push(c);
            prev_was_digit = is_digit;
        }
        out
    }
}

static BASIC_NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N} ]").expect("valid regex"));

/// Replaces every codepoint matched by a character-class pattern with a
/// single space.
#[derive(Debug)]
pub struct Cleanup {
    pattern: Regex,
}

impl Cleanup {
    /// Create a cleanup normalizer from a user-supplied pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| TiliaError::analysis(format!("invalid cleanup pattern: {e}")))?;
        Ok(Cleanup { pattern })
    }

    /// The standard cleanup class: codepoints that are neither letter, digit,
    /// nor ASCII space.
    pub fn basic_non_alphanumeric() -> Self {
        Cleanup {
            pattern: BASIC_NON_ALPHANUMERIC.clone(),
        }
    }
}

impl Normalizer for Cleanup {
    fn normalize(&self, input: &str) -> String {
        self.pattern.replace_all(input, " ").into_owned()
    }
}

/// Strips leading and trailing codepoints contained in a set, and collapses
/// internal runs of set members to the run's first character.
#[derive(Debug)]
pub struct Trim {
    chars: Vec<char>,
}

impl Trim {
    /// Create a trim normalizer over the given character set.
    pub fn new(chars: &str) -> Self {
        Trim {
            chars: chars.chars().collect(),
        }
    }

    fn in_set(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl Normalizer for Trim {
    fn normalize(&self, input: &str) -> String {
        let mut collapsed = String::with_capacity(input.len());
        let mut in_run = false;
        for c in input.chars() {
            if self.in_set(c) {
                if !in_run {
                    collapsed.push(c);
                    in_run = true;
                }
            } else {
                collapsed.push(c);
                in_run = false;
            }
        }
        collapsed.trim_matches(|c| self.in_set(c)).to_string()
    }
}

/// Identity normalizer.
#[derive(Debug, Default)]
pub struct Noop;

impl Noop {
    /// Create a new noop normalizer.
    pub fn new() -> Self {
        Noop
    }
}

impl Normalizer for Noop {
    fn normalize(&self, input: &str) -> String {
        input.to_string()
    }
}
