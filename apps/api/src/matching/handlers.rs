//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::keywords::{extract_keywords_with, KeywordPolicy, DEFAULT_KEYWORD_CAP};
use crate::matching::scorer::MatchScorer;
use crate::matching::shortlist::{shortlist, ScoredApplication, ShortlistEntry};
use crate::models::{MatchReport, ScorerBackend};
use crate::resume_text::extract_resume_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

// Absent and `null` résumé text or skills both mean "".

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    pub jd_text: String,
    #[serde(default)]
    pub extra_skills: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LlmMatchRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub jd_text: String,
    pub cap: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShortlistRequest {
    pub applications: Vec<ScoredApplication>,
    pub min_match_pct: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub min_match_pct: f64,
    pub entries: Vec<ShortlistEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Keyword overlap score of a résumé (plus declared skills) against a JD.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    require_jd(&request.jd_text)?;
    let scorer = state.scorer(ScorerBackend::Keyword)?;
    let resume_text = request.resume_text.unwrap_or_default();
    let extra_skills = request.extra_skills.unwrap_or_default();
    let report = score(scorer, &resume_text, &request.jd_text, &extra_skills).await?;
    Ok(Json(report))
}

/// POST /api/v1/match/llm
///
/// Generative evaluation. A reply the model garbled still returns 200 with the
/// unparseable fallback; only an unreachable service is an error.
pub async fn handle_match_llm(
    State(state): State<AppState>,
    Json(request): Json<LlmMatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    require_jd(&request.jd_text)?;
    let scorer = state.scorer(ScorerBackend::Llm)?;
    let resume_text = request.resume_text.unwrap_or_default();
    let report = score(scorer, &resume_text, &request.jd_text, "").await?;
    Ok(Json(report))
}

/// POST /api/v1/match/upload
///
/// Multipart form: `resume` (PDF), `jd_text`, optional `extra_skills` and
/// `backend` (`keyword` | `llm`, default keyword).
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let mut resume_pdf = None;
    let mut jd_text = String::new();
    let mut extra_skills = String::new();
    let mut backend = ScorerBackend::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => resume_pdf = Some(field.bytes().await?),
            "jd_text" => jd_text = field.text().await?,
            "extra_skills" => extra_skills = field.text().await?,
            "backend" => {
                backend = field
                    .text()
                    .await?
                    .parse()
                    .map_err(AppError::Validation)?;
            }
            _ => {}
        }
    }

    let resume_pdf =
        resume_pdf.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    require_jd(&jd_text)?;

    let scorer = state.scorer(backend)?;
    let resume_text = extract_resume_text(resume_pdf).await;
    let report = score(scorer, &resume_text, &jd_text, &extra_skills).await?;
    Ok(Json(report))
}

/// POST /api/v1/keywords
///
/// Previews the keyword set a JD would be scored against, sorted.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let mut policy: KeywordPolicy = state.config.keyword_policy();
    if let Some(cap) = request.cap {
        if cap > DEFAULT_KEYWORD_CAP {
            return Err(AppError::Validation(format!(
                "cap must be at most {DEFAULT_KEYWORD_CAP}"
            )));
        }
        policy.cap = cap;
    }
    let keywords = extract_keywords_with(&request.jd_text, &policy)
        .into_iter()
        .collect();
    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/shortlist
///
/// Filters and ranks already-scored applications for review.
pub async fn handle_shortlist(
    State(state): State<AppState>,
    Json(request): Json<ShortlistRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    let min_match_pct = request.min_match_pct.unwrap_or(state.config.min_match_pct);
    if !(0.0..=100.0).contains(&min_match_pct) {
        return Err(AppError::Validation(
            "min_match_pct must be between 0 and 100".to_string(),
        ));
    }

    let entries = shortlist(
        request.applications,
        min_match_pct,
        state.config.interview_eligibility_pct,
    );
    Ok(Json(ShortlistResponse {
        min_match_pct,
        entries,
    }))
}

fn require_jd(jd_text: &str) -> Result<(), AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    Ok(())
}

async fn score(
    scorer: &dyn MatchScorer,
    resume_text: &str,
    jd_text: &str,
    extra_skills: &str,
) -> Result<MatchReport, AppError> {
    let result = scorer.score(resume_text, jd_text, extra_skills).await?;
    let report = MatchReport::new(scorer.backend(), result);
    info!(
        report_id = %report.report_id,
        backend = report.backend.as_str(),
        match_percent = report.result.match_percent,
        missing = report.result.missing_keywords.len(),
        "Scored résumé against JD"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::matching::scorer::{KeywordMatchScorer, LlmMatchScorer, MatchScorer};
    use crate::routes::build_router;
    use crate::state::AppState;

    enum Reply {
        Text(&'static str),
        Down,
    }

    #[async_trait]
    impl TextGenerator for Reply {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            match self {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Down => Err(LlmError::Api {
                    status: 500,
                    message: "down".to_string(),
                }),
            }
        }
    }

    fn app(llm: Option<Reply>) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState {
            keyword_scorer: Arc::new(KeywordMatchScorer {
                policy: config.keyword_policy(),
            }),
            llm_scorer: llm.map(|reply| {
                Arc::new(LlmMatchScorer(Arc::new(reply))) as Arc<dyn MatchScorer>
            }),
            config,
        };
        build_router(state)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_match_endpoint_scores_with_keywords() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/match",
            json!({
                "resume_text": "I know Python and SQL",
                "jd_text": "Python Python SQL AWS AWS AWS",
                "extra_skills": "aws"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "keyword");
        assert_eq!(body["match_percent"], 100.0);
        assert_eq!(body["missing_keywords"], json!([]));
        assert_eq!(body["summary"], "");
        assert!(body["report_id"].is_string());
    }

    #[tokio::test]
    async fn test_match_endpoint_rejects_blank_jd() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/match",
            json!({"resume_text": "Rust", "jd_text": "  "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_llm_endpoint_without_key_is_unavailable() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/match/llm",
            json!({"resume_text": "Rust", "jd_text": "Rust"}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "LLM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_llm_endpoint_normalizes_reply() {
        let reply = Reply::Text(
            "Here you go: {\"JD Match\":\"82%\",\"MissingKeywords\":[\"docker\"],\"Profile Summary\":\"ok\"}",
        );
        let (status, body) = post_json(
            app(Some(reply)),
            "/api/v1/match/llm",
            json!({"resume_text": "Python", "jd_text": "Python and Docker"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "llm");
        assert_eq!(body["match_percent"], 82.0);
        assert_eq!(body["missing_keywords"], json!(["docker"]));
        assert_eq!(body["summary"], "ok");
    }

    #[tokio::test]
    async fn test_llm_endpoint_garbled_reply_is_ok_fallback() {
        let (status, body) = post_json(
            app(Some(Reply::Text("not json at all"))),
            "/api/v1/match/llm",
            json!({"resume_text": "Python", "jd_text": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_percent"], 0.0);
        assert_eq!(body["summary"], "(unparseable)");
    }

    #[tokio::test]
    async fn test_llm_endpoint_transport_fault_is_bad_gateway() {
        let (status, body) = post_json(
            app(Some(Reply::Down)),
            "/api/v1/match/llm",
            json!({"resume_text": "Python", "jd_text": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_match_endpoint_treats_null_resume_as_empty() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/match",
            json!({"resume_text": null, "jd_text": "Python Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_percent"], 0.0);
        assert_eq!(body["missing_keywords"], json!(["python"]));
    }

    #[tokio::test]
    async fn test_match_endpoint_treats_null_skills_as_empty() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/match",
            json!({"resume_text": "python", "jd_text": "Python Python", "extra_skills": null}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_percent"], 100.0);
    }

    #[tokio::test]
    async fn test_llm_endpoint_treats_null_resume_as_empty() {
        let reply = Reply::Text(r#"{"JD Match":"0%","MissingKeywords":["python"],"Profile Summary":"none"}"#);
        let (status, body) = post_json(
            app(Some(reply)),
            "/api/v1/match/llm",
            json!({"resume_text": null, "jd_text": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "none");
    }

    #[tokio::test]
    async fn test_keywords_endpoint_rejects_cap_above_maximum() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/keywords",
            json!({"jd_text": "Python Python", "cap": 121}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_keywords_endpoint_returns_sorted_set() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/keywords",
            json!({"jd_text": "Python Python SQL AWS AWS AWS", "cap": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["aws", "python"]));
    }

    #[tokio::test]
    async fn test_shortlist_endpoint_uses_configured_threshold() {
        let (status, body) = post_json(
            app(None),
            "/api/v1/shortlist",
            json!({"applications": [
                {"candidate_name": "Ana", "email": "ana@example.com", "match_percent": 71.234,
                 "submitted_at": "2026-03-01T09:00:00Z"},
                {"candidate_name": "Ben", "email": "ben@example.com", "match_percent": 40.0,
                 "submitted_at": "2026-03-02T09:00:00Z"}
            ]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["min_match_pct"], 70.0);
        assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        assert_eq!(body["entries"][0]["match_percent"], 71.23);
        assert_eq!(body["entries"][0]["interview_eligible"], true);
    }

    #[tokio::test]
    async fn test_shortlist_endpoint_rejects_out_of_range_threshold() {
        let (status, _) = post_json(
            app(None),
            "/api/v1/shortlist",
            json!({"applications": [], "min_match_pct": 150}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!("--{boundary}\r\n"));
            if *name == "resume" {
                body.push_str(
                    "Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n\
                     Content-Type: application/pdf\r\n\r\n",
                );
            } else {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        body
    }

    async fn post_multipart(app: Router, fields: &[(&str, &str)]) -> (StatusCode, Value) {
        let boundary = "ats-test-boundary";
        let request = Request::post("/api/v1/match/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(multipart_body(boundary, fields)))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upload_with_unreadable_pdf_scores_skills_only() {
        let (status, body) = post_multipart(
            app(None),
            &[
                ("resume", "not really a pdf"),
                ("jd_text", "Python Python SQL AWS AWS AWS"),
                ("extra_skills", "python, sql"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "keyword");
        assert_eq!(body["missing_keywords"], json!(["aws"]));
    }

    #[tokio::test]
    async fn test_upload_requires_resume() {
        let (status, body) = post_multipart(app(None), &[("jd_text", "Rust")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "resume file is required");
    }

    #[tokio::test]
    async fn test_upload_rejects_unknown_backend() {
        let (status, _) = post_multipart(
            app(None),
            &[("resume", "x"), ("jd_text", "Rust"), ("backend", "semantic")],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
