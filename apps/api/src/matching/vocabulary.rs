//! Fixed vocabulary tables consulted by the tokenizer.
//!
//! Membership here is content, not structure: keyword sets (and therefore every
//! match score) shift when an entry is added or removed.

/// Function words and generic filler dropped from every token stream.
pub const STOPWORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "for", "in", "of", "on", "at", "by", "with", "is", "are",
    "was", "were", "be", "been", "it", "as", "that", "this", "these", "those", "from", "into",
    "your", "you", "we", "our", "their", "they", "i", "he", "she", "them", "us", "will", "can",
    "may", "might", "should", "could", "would", "over", "under", "between", "within", "per",
    "using", "use", "used", "etc", "&", "+", "-", "/", "\\",
];

/// Short technical tokens that survive the minimum-length filter.
pub const TECH_KEEP: &[&str] = &["c", "c++", "c#", "go", "r", "sql"];

/// Tokens shorter than this are dropped unless listed in [`TECH_KEEP`].
pub const MIN_TOKEN_CHARS: usize = 2;

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

pub fn is_technical(token: &str) -> bool {
    TECH_KEEP.contains(&token)
}
