#![allow(dead_code)]

//! Match Scoring — pluggable, trait-based scorer that measures a résumé against a JD.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, fast, deterministic, fully testable).
//! Alternate: `LlmMatchScorer` (asks a generative model, same result shape).
//!
//! `AppState` holds both as `Arc<dyn MatchScorer>`; callers pick per request.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::matching::keywords::{extract_keywords_with, KeywordPolicy};
use crate::matching::llm_evaluator::evaluate_with_llm;
use crate::matching::tokenizer::tokenize;
use crate::models::{MatchResult, ScorerBackend};

/// Separators between entries of a declared skills list.
const SKILL_SEPARATORS: &[char] = &[',', ';', '\n'];

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap backends without touching handlers or callers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    fn backend(&self) -> ScorerBackend;

    async fn score(
        &self,
        resume_text: &str,
        jd_text: &str,
        extra_skills: &str,
    ) -> Result<MatchResult, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Lexical overlap scorer. No I/O.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatchScorer {
    pub policy: KeywordPolicy,
}

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Keyword
    }

    async fn score(
        &self,
        resume_text: &str,
        jd_text: &str,
        extra_skills: &str,
    ) -> Result<MatchResult, AppError> {
        Ok(compute_match_with(
            resume_text,
            jd_text,
            extra_skills,
            &self.policy,
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer — generative evaluation
// ────────────────────────────────────────────────────────────────────────────

/// Delegates to the LLM evaluator. Declared skills are not part of the prompt.
pub struct LlmMatchScorer(pub Arc<dyn TextGenerator>);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Llm
    }

    async fn score(
        &self,
        resume_text: &str,
        jd_text: &str,
        _extra_skills: &str,
    ) -> Result<MatchResult, AppError> {
        Ok(evaluate_with_llm(self.0.as_ref(), resume_text, jd_text).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core overlap algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` plus declared `extra_skills` against the keyword set of
/// `jd_text`, using the default keyword policy.
pub fn compute_match(resume_text: &str, jd_text: &str, extra_skills: &str) -> MatchResult {
    compute_match_with(resume_text, jd_text, extra_skills, &KeywordPolicy::default())
}

pub fn compute_match_with(
    resume_text: &str,
    jd_text: &str,
    extra_skills: &str,
    policy: &KeywordPolicy,
) -> MatchResult {
    let jd_keywords = extract_keywords_with(jd_text, policy);
    if jd_keywords.is_empty() {
        return MatchResult::empty();
    }

    let candidate_tokens = effective_tokens(resume_text, extra_skills);

    let matched = jd_keywords
        .iter()
        .filter(|k| candidate_tokens.contains(*k))
        .count();
    let match_percent = matched as f64 / jd_keywords.len() as f64 * 100.0;

    // BTreeSet iteration is already ascending.
    let missing_keywords = jd_keywords
        .into_iter()
        .filter(|k| !candidate_tokens.contains(k))
        .collect();

    MatchResult::new(match_percent, missing_keywords, String::new())
}

/// Résumé tokens unioned with tokens from each declared skill.
pub fn effective_tokens(resume_text: &str, extra_skills: &str) -> BTreeSet<String> {
    let mut tokens: BTreeSet<String> = tokenize(resume_text).into_iter().collect();

    if !extra_skills.trim().is_empty() {
        for skill in extra_skills.split(SKILL_SEPARATORS) {
            let skill = skill.trim();
            if !skill.is_empty() {
                tokens.extend(tokenize(skill));
            }
        }
    }

    tokens
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
