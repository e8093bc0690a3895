// LLM prompt constants for the matching engine.

/// Keys the evaluator prompt asks the model to emit.
pub const MATCH_KEY: &str = "JD Match";
pub const MISSING_KEYWORDS_KEY: &str = "MissingKeywords";
pub const SUMMARY_KEY: &str = "Profile Summary";

/// ATS evaluation prompt. Replace `{resume_text}` and `{jd_text}` before sending.
pub const ATS_EVALUATION_PROMPT_TEMPLATE: &str = "You are an experienced ATS. \
    Evaluate the candidate resume against the given job description. \
    Return ONLY valid minified JSON with EXACT keys: \
    {\"JD Match\":\"<percent 0-100 as number or string>\",\"MissingKeywords\":[...],\"Profile Summary\":\"...\"} \
    No extra text.\n\nresume: {resume_text}\n\ndescription: {jd_text}";

pub fn build_evaluation_prompt(resume_text: &str, jd_text: &str) -> String {
    // JD first so placeholder-like text inside the résumé is never substituted.
    ATS_EVALUATION_PROMPT_TEMPLATE
        .replacen("{jd_text}", jd_text, 1)
        .replacen("{resume_text}", resume_text, 1)
}
