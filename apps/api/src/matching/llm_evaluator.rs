//! LLM Evaluator — scores a résumé by asking a generative model, then coerces
//! whatever comes back into a [`MatchResult`].
//!
//! Malformed model output is expected, not exceptional: interpretation is
//! total and falls back to [`MatchResult::unparseable`]. Only a transport
//! fault of the call itself surfaces as an error.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::matching::prompts::{
    build_evaluation_prompt, MATCH_KEY, MISSING_KEYWORDS_KEY, SUMMARY_KEY,
};
use crate::models::MatchResult;

type JsonObject = Map<String, Value>;

/// A single way of recovering a JSON object from raw model text.
#[derive(Clone, Copy)]
pub struct ParseStrategy {
    pub name: &'static str,
    pub parse: fn(&str) -> Option<JsonObject>,
}

/// Tried left to right; the first success wins.
pub const PARSE_CHAIN: &[ParseStrategy] = &[
    ParseStrategy {
        name: "direct",
        parse: parse_direct,
    },
    ParseStrategy {
        name: "brace_slice",
        parse: parse_brace_slice,
    },
];

/// Sends both texts to the model once and interprets the reply.
pub async fn evaluate_with_llm(
    generator: &dyn TextGenerator,
    resume_text: &str,
    jd_text: &str,
) -> Result<MatchResult, LlmError> {
    let prompt = build_evaluation_prompt(resume_text, jd_text);
    let raw = generator.generate(&prompt).await?;
    Ok(interpret_response(&raw))
}

/// Converts raw model text into a result, never failing.
pub fn interpret_response(raw: &str) -> MatchResult {
    match parse_with_chain(raw.trim(), PARSE_CHAIN) {
        Some(object) => result_from_object(&object),
        None => {
            warn!(
                response_len = raw.len(),
                "LLM response unparseable, using fallback result"
            );
            MatchResult::unparseable()
        }
    }
}

pub fn parse_with_chain(raw: &str, chain: &[ParseStrategy]) -> Option<JsonObject> {
    chain.iter().find_map(|strategy| {
        let object = (strategy.parse)(raw)?;
        debug!(strategy = strategy.name, "Parsed LLM response");
        Some(object)
    })
}

fn parse_direct(raw: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Parses the span from the first `{` to the last `}` inclusive, which
/// tolerates commentary or markdown fences around the JSON.
fn parse_brace_slice(raw: &str) -> Option<JsonObject> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_direct(&raw[start..=end])
}

fn result_from_object(object: &JsonObject) -> MatchResult {
    let match_percent = object.get(MATCH_KEY).map(normalize_pct).unwrap_or(0.0);

    let missing_keywords = object
        .get(MISSING_KEYWORDS_KEY)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(keyword_text).collect())
        .unwrap_or_default();

    let summary = object
        .get(SUMMARY_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    MatchResult::new(match_percent, missing_keywords, summary)
}

fn keyword_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalizes a percentage field that may be a number, a numeric string, or a
/// numeric string with a trailing `%`. Anything else becomes `0.0`.
pub fn normalize_pct(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_suffix('%').unwrap_or(s);
            s.trim().parse::<f64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}
