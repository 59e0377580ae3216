use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::crypto::CryptoError;
use crate::enrichment::extract::ExtractError;
use crate::enrichment::fetch::FetchError;
use crate::llm_client::ModelError;

pub const MISSING_URL_MESSAGE: &str = "No PDF URL provided";
pub const EXTRACTION_MESSAGE: &str = "Failed to extract text from PDF";
pub const PARSE_MESSAGE: &str = "Failed to parse resume data";
pub const GENERIC_MESSAGE: &str = "Failed to process resume";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only a fixed message ever reaches the caller; the detail carried by each
/// variant is logged server side.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("PDF fetch failed: {0}")]
    UpstreamFetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("PDF parse error: {0}")]
    PdfParse(#[from] ExtractError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Encryption error: {0}")]
    Encryption(#[from] CryptoError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::Extraction(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidRequest(_) => MISSING_URL_MESSAGE,
            AppError::Extraction(_) => EXTRACTION_MESSAGE,
            AppError::Unauthorized(e) => e.public_message(),
            AppError::Parse(detail) => {
                tracing::error!("Parsing error: {detail}");
                PARSE_MESSAGE
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                GENERIC_MESSAGE
            }
            other => {
                tracing::error!("Enrichment failed: {other}");
                GENERIC_MESSAGE
            }
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
