// Résumé-to-job matching engine.
// Implements: tokenization, keyword extraction, overlap scoring, LLM evaluation, shortlisting.
// All LLM calls go through llm_client — no direct API calls here.

pub mod handlers;
pub mod keywords;
pub mod llm_evaluator;
pub mod prompts;
pub mod scorer;
pub mod shortlist;
pub mod tokenizer;
pub mod vocabulary;
