#![allow(dead_code)]

//! Keyword extraction — the salient vocabulary of a job description.
//!
//! Terms repeated in a JD are treated as requirements. Short postings rarely
//! repeat enough terms for that signal to be useful, so below a threshold the
//! extractor falls back to the top-ranked terms regardless of frequency.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::tokenizer::tokenize;

/// Upper bound on the size of a keyword set.
pub const DEFAULT_KEYWORD_CAP: usize = 120;
/// Minimum occurrences for a term to count as repeated.
pub const MIN_REPEAT_FREQUENCY: u32 = 2;
/// Fewer repeated terms than this means the JD is too sparse for frequency signal.
pub const SPARSE_VOCABULARY_THRESHOLD: usize = 40;

/// A JD's keyword set. Ordered so that downstream gap lists are deterministic.
pub type KeywordSet = BTreeSet<String>;

/// Tunable parameters of keyword selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPolicy {
    pub cap: usize,
    pub min_frequency: u32,
    pub sparse_threshold: usize,
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self {
            cap: DEFAULT_KEYWORD_CAP,
            min_frequency: MIN_REPEAT_FREQUENCY,
            sparse_threshold: SPARSE_VOCABULARY_THRESHOLD,
        }
    }
}

impl KeywordPolicy {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }
}

/// Which branch of the selection policy produced a keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only terms that reached `min_frequency`.
    Repeated,
    /// Top-ranked terms regardless of frequency.
    TopRanked,
}

/// A distinct token and its number of occurrences in the JD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTerm {
    pub token: String,
    pub frequency: u32,
}

/// Extracts at most `cap` keywords from `jd_text` using the default thresholds.
pub fn extract_keywords(jd_text: &str, cap: usize) -> KeywordSet {
    extract_keywords_with(jd_text, &KeywordPolicy::with_cap(cap))
}

pub fn extract_keywords_with(jd_text: &str, policy: &KeywordPolicy) -> KeywordSet {
    let ranked = rank_terms(&tokenize(jd_text));
    let (selection, chosen) = select_terms(&ranked, policy);

    debug!(
        distinct_terms = ranked.len(),
        selected = chosen.len(),
        ?selection,
        "Extracted JD keywords"
    );

    chosen.into_iter().map(|t| t.token.clone()).collect()
}

/// Counts tokens and orders them by descending frequency, then ascending token.
pub fn rank_terms(tokens: &[String]) -> Vec<RankedTerm> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedTerm> = counts
        .into_iter()
        .map(|(token, frequency)| RankedTerm {
            token: token.to_string(),
            frequency,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.token.cmp(&b.token))
    });
    ranked
}

/// Two-branch selection over a ranked term list, truncated to `policy.cap`.
pub fn select_terms<'a>(
    ranked: &'a [RankedTerm],
    policy: &KeywordPolicy,
) -> (Selection, Vec<&'a RankedTerm>) {
    let repeated: Vec<&RankedTerm> = ranked
        .iter()
        .filter(|t| t.frequency >= policy.min_frequency)
        .collect();

    if repeated.len() < policy.sparse_threshold {
        let top = ranked.iter().take(policy.cap).collect();
        return (Selection::TopRanked, top);
    }

    let mut repeated = repeated;
    repeated.truncate(policy.cap);
    (Selection::Repeated, repeated)
}
