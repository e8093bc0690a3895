use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::matching::scorer::MatchScorer;
use crate::models::ScorerBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Lexical scorer; always available.
    pub keyword_scorer: Arc<dyn MatchScorer>,
    /// Generative scorer; `None` when no API key is configured.
    pub llm_scorer: Option<Arc<dyn MatchScorer>>,
}

impl AppState {
    pub fn scorer(&self, backend: ScorerBackend) -> Result<&dyn MatchScorer, AppError> {
        match backend {
            ScorerBackend::Keyword => Ok(self.keyword_scorer.as_ref()),
            ScorerBackend::Llm => self.llm_scorer.as_deref().ok_or(AppError::LlmUnavailable),
        }
    }
}
