use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest gap list ever reported for one evaluation.
pub const MAX_MISSING_KEYWORDS: usize = 20;

/// Summary reported when a model response could not be interpreted.
pub const UNPARSEABLE_SUMMARY: &str = "(unparseable)";

/// Outcome of scoring one résumé against one job description.
///
/// Construct through [`MatchResult::new`] so the percentage is clamped and the
/// gap list bounded regardless of which backend produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percent: f64, // 0.0 – 100.0
    pub missing_keywords: Vec<String>,
    pub summary: String,
}

impl MatchResult {
    pub fn new(match_percent: f64, mut missing_keywords: Vec<String>, summary: String) -> Self {
        missing_keywords.truncate(MAX_MISSING_KEYWORDS);
        Self {
            match_percent: clamp_percent(match_percent),
            missing_keywords,
            summary,
        }
    }

    /// The zero result used when there is nothing to score against.
    pub fn empty() -> Self {
        Self::new(0.0, vec![], String::new())
    }

    pub fn unparseable() -> Self {
        Self::new(0.0, vec![], UNPARSEABLE_SUMMARY.to_string())
    }
}

/// Clamps to [0, 100]; NaN collapses to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Which scoring path produced a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerBackend {
    #[default]
    Keyword,
    Llm,
}

impl ScorerBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerBackend::Keyword => "keyword",
            ScorerBackend::Llm => "llm",
        }
    }
}

impl std::str::FromStr for ScorerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(ScorerBackend::Keyword),
            "llm" => Ok(ScorerBackend::Llm),
            other => Err(format!("unknown scorer backend '{other}'")),
        }
    }
}

/// A scored evaluation as returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub report_id: Uuid,
    pub backend: ScorerBackend, // "keyword" | "llm" — for transparency
    #[serde(flatten)]
    pub result: MatchResult,
    pub evaluated_at: DateTime<Utc>,
}

impl MatchReport {
    pub fn new(backend: ScorerBackend, result: MatchResult) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            backend,
            result,
            evaluated_at: Utc::now(),
        }
    }
}
