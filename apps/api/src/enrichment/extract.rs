use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

/// Pulls plain text out of a PDF document.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, pdf: Bytes) -> Result<String, ExtractError>;
}

/// Digital-PDF text extraction via `pdf-extract`.
///
/// Parsing is CPU-bound and the parser can panic on malformed input, so it
/// runs on the blocking pool and a panic surfaces as `ExtractError::Aborted`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, pdf: Bytes) -> Result<String, ExtractError> {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
            .await
            .map_err(|e| ExtractError::Aborted(e.to_string()))?
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}
