//! Token representation flowing through the tokenizer pipeline.

/// A single token produced by the analysis pipeline.
///
/// Positions are 0-based indexes within the token stream; `line` is the
/// 0-based line number of the source text the token was cut from. Both
/// survive filtering stages such as [`Unique`](crate::analysis::tokenizer::Unique),
/// which keeps the first occurrence's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text.
    pub text: String,
    /// 0-based position within the token stream.
    pub position: usize,
    /// 0-based line number in the source text.
    pub line: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, position: usize, line: usize) -> Self {
        Token {
            text: text.into(),
            position,
            line,
        }
    }

    /// The seed token a pipeline starts from: the whole input at position 0,
    /// line 0.
    pub fn seed(text: impl Into<String>) -> Self {
        Token::new(text, 0, 0)
    }

    /// Replace the text, keeping position and line.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Token::new(text, self.position, self.line)
    }
}
