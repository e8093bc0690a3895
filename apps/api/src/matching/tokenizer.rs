//! Tokenizer — lowercases free text and splits it into technical-aware tokens.

use crate::matching::vocabulary::{is_stopword, is_technical, MIN_TOKEN_CHARS};

/// Characters that may appear inside a token besides letters and digits.
/// Keeps `c++`, `c#` and `node.js` intact.
const TOKEN_SYMBOLS: &[char] = &['+', '#', '.'];

/// Splits `text` into normalized tokens, preserving source order.
///
/// A token is a maximal run of letters, digits, `+`, `#` or `.` after
/// lowercasing. Stopwords are dropped, as are single-character tokens that are
/// not in the technical allow-list. Duplicates are kept; callers that need a
/// set dedupe themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|run| keep_token(run))
        .map(String::from)
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || TOKEN_SYMBOLS.contains(&c)
}

fn keep_token(token: &str) -> bool {
    if token.is_empty() || is_stopword(token) {
        return false;
    }
    token.chars().count() >= MIN_TOKEN_CHARS || is_technical(token)
}
