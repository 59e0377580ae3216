use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::crypto::FieldCipher;
use crate::enrichment::extract::TextExtractor;
use crate::enrichment::fetch::PdfFetcher;
use crate::enrichment::store::ApplicantStore;
use crate::llm_client::GenerativeModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PdfFetcher>,
    pub extractor: Arc<dyn TextExtractor>,
    /// Gemini in production.
    pub model: Arc<dyn GenerativeModel>,
    /// Applied to applicant name/email before persistence.
    pub cipher: Arc<dyn FieldCipher>,
    pub store: Arc<dyn ApplicantStore>,
    pub tokens: TokenVerifier,
}
