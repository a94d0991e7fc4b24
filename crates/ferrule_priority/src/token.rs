//! Token types produced by the tokenizer.
//!
//! Tokens borrow from the input string; nothing is copied until a
//! diagnostic needs a truncated echo. The token list is capacity-bounded
//! so that pathological inputs are rejected with `TooComplex` instead of
//! growing without bound.

use serde::Serialize;

/// Maximum number of tokens in a priority string.
pub const MAX_TOKENS: usize = 64;

/// Maximum length of a single token in bytes.
pub const MAX_TOKEN_LEN: usize = 64;

/// Semantic category assigned to a token by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenCategory {
    /// Unclassified token; skipped by the parser.
    Unknown,
    /// Base keyword (`NORMAL`, `SECURE256`, ...).
    Keyword,
    /// `%`-prefixed modifier (`%SERVER_PRECEDENCE`, ...).
    Modifier,
    /// Protocol version (`VERS-TLS1.3`, ...).
    Version,
    /// Cipher algorithm name (`AES-256-GCM`, ...).
    Cipher,
    /// Key-exchange name (`ECDHE-RSA`, ...).
    KeyExchange,
    /// MAC algorithm name (`SHA256`, `AEAD`, ...).
    Mac,
    /// Signature algorithm (`SIGN-RSA-SHA256`, ...); reserved.
    Signature,
    /// Elliptic-curve group (`GROUP-SECP256R1`, ...); reserved.
    Group,
    /// Operator; consumed during tokenization, never emitted.
    Operator,
}

impl TokenCategory {
    /// Returns the category name for diagnostics and debug dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Keyword => "KEYWORD",
            Self::Modifier => "MODIFIER",
            Self::Version => "VERSION",
            Self::Cipher => "CIPHER",
            Self::KeyExchange => "KEY_EXCHANGE",
            Self::Mac => "MAC",
            Self::Signature => "SIGNATURE",
            Self::Group => "GROUP",
            Self::Operator => "OPERATOR",
        }
    }
}

/// A single classified token, borrowing from the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Semantic category.
    pub category: TokenCategory,
    /// Token text, a slice of the original input.
    pub text: &'a str,
    /// Byte offset of the token in the original input.
    pub offset: usize,
    /// True when the effective operator is addition (`+` or none).
    pub is_add: bool,
    /// True when the effective operator is removal (`-` or `!`).
    pub is_remove: bool,
}

/// Ordered, capacity-bounded token sequence plus the original input.
#[derive(Debug, Clone)]
pub struct TokenList<'a> {
    tokens: Vec<Token<'a>>,
    input: &'a str,
}

impl<'a> TokenList<'a> {
    /// Creates an empty list over the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            tokens: Vec::new(),
            input,
        }
    }

    /// The original input string, kept for error-position reporting.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token<'a>> {
        self.tokens.get(index)
    }

    /// Iterates over the tokens in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    pub(crate) fn push(&mut self, token: Token<'a>) {
        debug_assert!(self.tokens.len() < MAX_TOKENS);
        self.tokens.push(token);
    }
}

impl<'a> IntoIterator for &'a TokenList<'a> {
    type Item = &'a Token<'a>;
    type IntoIter = std::slice::Iter<'a, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_stable() {
        assert_eq!(TokenCategory::Keyword.name(), "KEYWORD");
        assert_eq!(TokenCategory::KeyExchange.name(), "KEY_EXCHANGE");
        assert_eq!(TokenCategory::Unknown.name(), "UNKNOWN");
    }

    #[test]
    fn token_list_tracks_input_reference() {
        let input = "NORMAL";
        let list = TokenList::new(input);
        assert!(list.is_empty());
        assert_eq!(list.input(), "NORMAL");
    }
}
