//! Priority string tokenizer and token classifier.
//!
//! Single left-to-right scan, O(n) in the input length. The leading
//! operator of each segment (`+`, `-`, `!`) is folded into the following
//! token's add/remove flags; `:` is a pure separator that resets the
//! operator state to its default (addition). An operator is consumed by
//! exactly the next token and never carries across token boundaries.
//! Operators are recognized only at the start of a segment: inside a
//! token, `-` is an ordinary character, so `VERS-TLS1.0` and
//! `AES-256-GCM` each tokenize as a single token.

use crate::error::{truncate_echo, Error, Result, MAX_ERROR_TOKEN};
use crate::token::{Token, TokenCategory, TokenList, MAX_TOKENS, MAX_TOKEN_LEN};

/// Keywords recognized by the classifier. `SUITEB128`/`SUITEB192` are
/// classified here but rejected later by the parser (no backend mapping).
const BASE_KEYWORDS: [&str; 11] = [
    "NORMAL",
    "PERFORMANCE",
    "SECURE128",
    "SECURE192",
    "SECURE256",
    "PFS",
    "LEGACY",
    "SUITEB128",
    "SUITEB192",
    "NONE",
    "SYSTEM",
];

/// Modifiers recognized by the classifier. Only a subset has a backend
/// mapping; the rest parse as tolerated no-ops.
const KNOWN_MODIFIERS: [&str; 17] = [
    "%SERVER_PRECEDENCE",
    "%COMPAT",
    "%NO_EXTENSIONS",
    "%FORCE_SESSION_HASH",
    "%DUMBFW",
    "%FALLBACK_SCSV",
    "%NO_TICKETS",
    "%DISABLE_SAFE_RENEGOTIATION",
    "%UNSAFE_RENEGOTIATION",
    "%PARTIAL_RENEGOTIATION",
    "%PROFILE_LOW",
    "%PROFILE_MEDIUM",
    "%PROFILE_HIGH",
    "%PROFILE_ULTRA",
    "%PROFILE_FUTURE",
    "%PROFILE_SUITEB128",
    "%PROFILE_SUITEB192",
];

const CIPHER_HINTS: [&str; 7] = [
    "AES", "CHACHA20", "CAMELLIA", "ARCFOUR", "3DES", "NULL", "CIPHER",
];

const KX_HINTS: [&str; 5] = ["ECDHE", "DHE", "RSA", "ECDSA", "PSK"];

/// Splits a priority string into classified tokens.
///
/// # Errors
///
/// - [`Error::Syntax`] when a token meets or exceeds [`MAX_TOKEN_LEN`].
/// - [`Error::TooComplex`] when the token count would exceed
///   [`MAX_TOKENS`].
///
/// An empty input is valid and yields an empty token list.
pub fn tokenize(input: &str) -> Result<TokenList<'_>> {
    let mut tokens = TokenList::new(input);
    let mut is_add = true;
    let mut is_remove = false;
    // Operators are only recognized at the start of a segment; once a
    // token has begun, `-` is an ordinary character (`VERS-TLS1.0`,
    // `AES-256-GCM`).
    let mut at_segment_start = true;

    let mut chars = input.char_indices().peekable();
    while let Some(&(offset, c)) = chars.peek() {
        if c.is_ascii_whitespace() {
            chars.next();
            at_segment_start = true;
            continue;
        }

        if c == ':' {
            // Separator: reset to the default (implicit addition).
            is_add = true;
            is_remove = false;
            at_segment_start = true;
            chars.next();
            continue;
        }

        if at_segment_start && matches!(c, '+' | '-' | '!') {
            if c == '+' {
                is_add = true;
                is_remove = false;
            } else {
                is_add = false;
                is_remove = true;
            }
            at_segment_start = false;
            chars.next();
            continue;
        }

        // Maximal run up to the next separator or whitespace.
        let start = offset;
        while let Some(&(_, c)) = chars.peek() {
            if c == ':' || c.is_ascii_whitespace() {
                break;
            }
            chars.next();
        }
        let end = chars.peek().map_or(input.len(), |&(i, _)| i);
        let text = &input[start..end];

        if text.len() >= MAX_TOKEN_LEN {
            return Err(Error::Syntax {
                offset: start,
                token: truncate_echo(text, MAX_ERROR_TOKEN),
            });
        }
        if tokens.len() >= MAX_TOKENS {
            return Err(Error::TooComplex { offset: start });
        }

        tokens.push(Token {
            category: classify(text),
            text,
            offset: start,
            is_add,
            is_remove,
        });

        // Operator state is consumed by exactly one token.
        is_add = true;
        is_remove = false;
        at_segment_start = false;
    }

    Ok(tokens)
}

/// Classifies token text into a semantic category.
///
/// Pure function of the text: exact keyword and modifier tables first,
/// then `VERS-`/`SIGN-`/`GROUP-` prefixes, then substring heuristics for
/// cipher, key-exchange and MAC families. Unknown text is not an error
/// here; the parser decides what to do with it.
#[must_use]
pub fn classify(text: &str) -> TokenCategory {
    if text.starts_with('%') {
        if KNOWN_MODIFIERS.contains(&text) {
            return TokenCategory::Modifier;
        }
        // Unknown modifiers are tolerated downstream, not rejected.
        return TokenCategory::Unknown;
    }

    if BASE_KEYWORDS.contains(&text) {
        return TokenCategory::Keyword;
    }

    if text.starts_with("VERS-") {
        return TokenCategory::Version;
    }
    if text.starts_with("SIGN-") {
        return TokenCategory::Signature;
    }
    if text.starts_with("GROUP-") {
        return TokenCategory::Group;
    }

    if CIPHER_HINTS.iter().any(|hint| text.contains(hint)) {
        return TokenCategory::Cipher;
    }

    if KX_HINTS.iter().any(|hint| text.contains(hint)) || text == "KX-ALL" {
        return TokenCategory::KeyExchange;
    }

    if text.contains("SHA") || text.contains("MD5") || text == "AEAD" || text == "MAC-ALL" {
        return TokenCategory::Mac;
    }

    TokenCategory::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        let tokens = tokenize("").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn separators_only_yield_no_tokens() {
        let tokens = tokenize(":::").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn single_keyword() {
        let tokens = tokenize("NORMAL").unwrap();
        assert_eq!(tokens.len(), 1);
        let token = tokens.get(0).unwrap();
        assert_eq!(token.category, TokenCategory::Keyword);
        assert_eq!(token.text, "NORMAL");
        assert_eq!(token.offset, 0);
        assert!(token.is_add);
        assert!(!token.is_remove);
    }

    #[test]
    fn worked_example_tokenizes_to_five_tokens() {
        let tokens =
            tokenize("NORMAL:%SERVER_PRECEDENCE:%COMPAT:-VERS-SSL3.0:-VERS-TLS1.0").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens.get(0).unwrap().category, TokenCategory::Keyword);
        assert_eq!(tokens.get(1).unwrap().category, TokenCategory::Modifier);
        assert_eq!(tokens.get(2).unwrap().category, TokenCategory::Modifier);

        let ssl3 = tokens.get(3).unwrap();
        assert_eq!(ssl3.category, TokenCategory::Version);
        assert_eq!(ssl3.text, "VERS-SSL3.0");
        assert!(ssl3.is_remove);

        let tls10 = tokens.get(4).unwrap();
        assert_eq!(tls10.text, "VERS-TLS1.0");
        assert!(tls10.is_remove);
    }

    #[test]
    fn operator_resets_across_separator() {
        let tokens = tokenize("NORMAL:-VERS-TLS1.0:VERS-TLS1.1").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.get(1).unwrap().is_remove);
        // After ':' the state returns to implicit addition.
        let third = tokens.get(2).unwrap();
        assert!(third.is_add);
        assert!(!third.is_remove);
    }

    #[test]
    fn plus_operator_marks_addition() {
        let tokens = tokenize("NONE:+VERS-TLS1.3").unwrap();
        let version = tokens.get(1).unwrap();
        assert!(version.is_add);
        assert!(!version.is_remove);
    }

    #[test]
    fn bang_operator_marks_removal() {
        let tokens = tokenize("NORMAL:!VERS-TLS1.0").unwrap();
        assert!(tokens.get(1).unwrap().is_remove);
    }

    #[test]
    fn hyphen_inside_a_token_is_not_an_operator() {
        let tokens = tokenize("NORMAL:+VERS-TLS1.0:-AES-256-GCM").unwrap();
        assert_eq!(tokens.len(), 3);

        let version = tokens.get(1).unwrap();
        assert_eq!(version.text, "VERS-TLS1.0");
        assert_eq!(version.category, TokenCategory::Version);
        assert!(version.is_add);

        let cipher = tokens.get(2).unwrap();
        assert_eq!(cipher.text, "AES-256-GCM");
        assert_eq!(cipher.category, TokenCategory::Cipher);
        assert!(cipher.is_remove);
    }

    #[test]
    fn removed_version_is_a_single_token() {
        let tokens = tokenize("NORMAL:-VERS-TLS1.0").unwrap();
        assert_eq!(tokens.len(), 2);
        let version = tokens.get(1).unwrap();
        assert_eq!(version.text, "VERS-TLS1.0");
        assert_eq!(version.category, TokenCategory::Version);
        assert!(version.is_remove);
        assert!(!version.is_add);
    }

    #[test]
    fn added_version_is_a_single_token() {
        let tokens = tokenize("NONE:+VERS-TLS1.2").unwrap();
        assert_eq!(tokens.len(), 2);
        let version = tokens.get(1).unwrap();
        assert_eq!(version.text, "VERS-TLS1.2");
        assert!(version.is_add);
    }

    #[test]
    fn oversized_token_is_syntax_error() {
        let input = format!("NORMAL:{}", "A".repeat(MAX_TOKEN_LEN));
        let err = tokenize(&input).unwrap_err();
        assert!(matches!(err, Error::Syntax { offset: 7, .. }));
    }

    #[test]
    fn too_many_tokens_is_too_complex() {
        let input = ["AES"; MAX_TOKENS + 1].join(":");
        let err = tokenize(&input).unwrap_err();
        assert!(matches!(err, Error::TooComplex { .. }));
    }

    #[test]
    fn max_token_count_is_accepted() {
        let input = ["AES"; MAX_TOKENS].join(":");
        let tokens = tokenize(&input).unwrap();
        assert_eq!(tokens.len(), MAX_TOKENS);
    }

    #[test]
    fn offsets_point_into_the_input() {
        let input = "NORMAL:-VERS-TLS1.0";
        let tokens = tokenize(input).unwrap();
        let version = tokens.get(1).unwrap();
        assert_eq!(&input[version.offset..version.offset + version.text.len()], version.text);
    }

    #[test]
    fn classify_keywords_and_modifiers() {
        assert_eq!(classify("NORMAL"), TokenCategory::Keyword);
        assert_eq!(classify("SUITEB128"), TokenCategory::Keyword);
        assert_eq!(classify("%SERVER_PRECEDENCE"), TokenCategory::Modifier);
        assert_eq!(classify("%NO_TICKETS"), TokenCategory::Modifier);
        // Unknown modifiers classify as Unknown, not as an error.
        assert_eq!(classify("%BOGUS_FLAG"), TokenCategory::Unknown);
    }

    #[test]
    fn classify_prefixed_categories() {
        assert_eq!(classify("VERS-TLS1.3"), TokenCategory::Version);
        assert_eq!(classify("SIGN-RSA-SHA256"), TokenCategory::Signature);
        assert_eq!(classify("GROUP-SECP256R1"), TokenCategory::Group);
    }

    #[test]
    fn classify_algorithm_families() {
        assert_eq!(classify("AES-256-GCM"), TokenCategory::Cipher);
        assert_eq!(classify("CHACHA20-POLY1305"), TokenCategory::Cipher);
        assert_eq!(classify("3DES-CBC"), TokenCategory::Cipher);
        assert_eq!(classify("ECDHE-ECDSA"), TokenCategory::KeyExchange);
        assert_eq!(classify("KX-ALL"), TokenCategory::KeyExchange);
        assert_eq!(classify("SHA256"), TokenCategory::Mac);
        assert_eq!(classify("AEAD"), TokenCategory::Mac);
        assert_eq!(classify("MAC-ALL"), TokenCategory::Mac);
        assert_eq!(classify("whatever"), TokenCategory::Unknown);
    }

    #[test]
    fn cipher_hint_wins_over_mac_hint() {
        // Contains both "NULL" and "SHA": cipher heuristics run first.
        assert_eq!(classify("NULL-SHA"), TokenCategory::Cipher);
    }

    proptest! {
        #[test]
        fn tokenize_never_panics(input in ".*") {
            let _ = tokenize(&input);
        }

        #[test]
        fn tokenize_is_deterministic(input in "[A-Z0-9%:+!.-]{0,128}") {
            let first = tokenize(&input);
            let second = tokenize(&input);
            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a.len(), b.len());
                    for (x, y) in a.iter().zip(b.iter()) {
                        prop_assert_eq!(x, y);
                    }
                }
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                _ => prop_assert!(false, "results diverged"),
            }
        }

        #[test]
        fn tokens_always_within_bounds(input in "[A-Z:+-]{0,512}") {
            if let Ok(tokens) = tokenize(&input) {
                prop_assert!(tokens.len() <= MAX_TOKENS);
                for token in tokens.iter() {
                    prop_assert!(token.text.len() < MAX_TOKEN_LEN);
                    prop_assert!(!(token.is_add && token.is_remove));
                }
            }
        }
    }
}
