//! Résumé text extraction from uploaded PDF bytes.
//!
//! Extraction is best effort: an unreadable document scores as an empty résumé
//! rather than failing the application.

use bytes::Bytes;
use tracing::{debug, warn};

/// Extracts plain text from PDF bytes. PDF parsing is CPU-bound and runs inside
/// `spawn_blocking`. Returns an empty string on any failure.
pub async fn extract_resume_text(pdf: Bytes) -> String {
    if pdf.is_empty() {
        return String::new();
    }

    let size = pdf.len();
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf).map_err(|e| e.to_string())
    })
    .await;

    match extracted {
        Ok(Ok(text)) => {
            let text = text.trim().to_string();
            debug!(bytes = size, chars = text.len(), "Extracted résumé text");
            text
        }
        Ok(Err(e)) => {
            warn!(bytes = size, "Résumé PDF could not be read: {e}");
            String::new()
        }
        Err(e) => {
            warn!(bytes = size, "Résumé extraction task failed: {e}");
            String::new()
        }
    }
}
