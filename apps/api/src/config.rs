use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::keywords::{
    KeywordPolicy, DEFAULT_KEYWORD_CAP, MIN_REPEAT_FREQUENCY, SPARSE_VOCABULARY_THRESHOLD,
};
use crate::matching::shortlist::{DEFAULT_INTERVIEW_ELIGIBILITY_PCT, DEFAULT_MIN_MATCH_PCT};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLM evaluation is disabled when unset.
    pub google_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub min_match_pct: f64,
    pub interview_eligibility_pct: f64,
    pub keyword_cap: usize,
    pub sparse_vocabulary_threshold: usize,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            google_api_key: lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty()),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            min_match_pct: parse_or(&lookup, "MIN_MATCH_PCT", DEFAULT_MIN_MATCH_PCT)?,
            interview_eligibility_pct: parse_or(
                &lookup,
                "INTERVIEW_ELIGIBILITY_PCT",
                DEFAULT_INTERVIEW_ELIGIBILITY_PCT,
            )?,
            keyword_cap: parse_keyword_cap(&lookup)?,
            sparse_vocabulary_threshold: parse_or(
                &lookup,
                "SPARSE_VOCABULARY_THRESHOLD",
                SPARSE_VOCABULARY_THRESHOLD,
            )?,
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 120)?,
        })
    }

    pub fn keyword_policy(&self) -> KeywordPolicy {
        KeywordPolicy {
            cap: self.keyword_cap,
            min_frequency: MIN_REPEAT_FREQUENCY,
            sparse_threshold: self.sparse_vocabulary_threshold,
        }
    }
}

/// The keyword set never grows past `DEFAULT_KEYWORD_CAP`; larger values are refused.
fn parse_keyword_cap(lookup: &impl Fn(&str) -> Option<String>) -> Result<usize> {
    let cap = parse_or(lookup, "KEYWORD_CAP", DEFAULT_KEYWORD_CAP)?;
    if cap > DEFAULT_KEYWORD_CAP {
        bail!("KEYWORD_CAP must be at most {DEFAULT_KEYWORD_CAP}, got {cap}");
    }
    Ok(cap)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
