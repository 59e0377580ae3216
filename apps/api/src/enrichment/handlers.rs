//! Axum route handler for the enrichment API.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::auth::AuthUser;
use crate::enrichment::pipeline::enrich;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    #[serde(default)]
    pub pdf_url: Value,
}

/// POST /enrich
///
/// Fetches the PDF at `pdf_url`, structures it with Gemini and persists the
/// applicant. An unreadable body or a falsy `pdf_url` counts as missing; a
/// truthy non-string `pdf_url` cannot be fetched and fails like any other
/// upstream problem.
pub async fn handle_enrich(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let pdf_url = match payload {
        Ok(Json(request)) => pdf_url_from(request.pdf_url)?,
        Err(rejection) => {
            warn!("Unreadable enrich body: {rejection}");
            String::new()
        }
    };

    let applicant = enrich(&state, &pdf_url, &user).await?;
    Ok(Json(applicant))
}

fn pdf_url_from(value: Value) -> Result<String, AppError> {
    match value {
        Value::String(url) => Ok(url),
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(String::new()),
        other => Err(AppError::Internal(anyhow!(
            "pdf_url is not a string: {other}"
        ))),
    }
}
