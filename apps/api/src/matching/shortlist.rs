//! Shortlisting — which scored applications an HR reviewer should look at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default "Minimum Match %" for a shortlist.
pub const DEFAULT_MIN_MATCH_PCT: f64 = 70.0;
/// Applications at or above this score may be invited to interview.
pub const DEFAULT_INTERVIEW_ELIGIBILITY_PCT: f64 = 10.0;

/// A scored application as submitted by a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredApplication {
    pub candidate_name: String,
    pub email: String,
    pub match_percent: f64,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub candidate_name: String,
    pub email: String,
    pub match_percent: f64, // rounded to 2 decimals
    pub submitted_at: DateTime<Utc>,
    pub interview_eligible: bool,
}

/// Keeps applications scoring at least `min_match_pct`, best first and, among
/// equal scores, most recent first.
pub fn shortlist(
    applications: Vec<ScoredApplication>,
    min_match_pct: f64,
    eligibility_pct: f64,
) -> Vec<ShortlistEntry> {
    let mut kept: Vec<ScoredApplication> = applications
        .into_iter()
        .filter(|a| a.match_percent >= min_match_pct)
        .collect();

    kept.sort_by(|a, b| {
        b.match_percent
            .total_cmp(&a.match_percent)
            .then_with(|| b.submitted_at.cmp(&a.submitted_at))
    });

    kept.into_iter()
        .map(|a| {
            let match_percent = round2(a.match_percent);
            ShortlistEntry {
                candidate_name: a.candidate_name,
                email: a.email,
                match_percent,
                submitted_at: a.submitted_at,
                interview_eligible: match_percent >= eligibility_pct,
            }
        })
        .collect()
}

/// Two decimals, exact halves to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
