//! The enrichment pipeline: a strictly sequential chain of suspending calls.
//!
//! fetch → extract → prompt → model → parse → encrypt → persist
//!
//! Every collaborator failure converts into an `AppError` at this boundary.
//! Nothing is retried.

use anyhow::anyhow;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::auth::AuthUser;
use crate::crypto::{CryptoError, FieldCipher};
use crate::enrichment::prompts::build_resume_prompt;
use crate::enrichment::store::NewApplicant;
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, ModelError};
use crate::models::applicant::ApplicantRecord;
use crate::state::AppState;

/// Fields replaced with ciphertext before persistence.
pub const ENCRYPTED_FIELDS: [&str; 2] = ["name", "email"];

/// Turns a PDF URL into a persisted applicant and returns the object as stored,
/// with `name`/`email` already encrypted.
pub async fn enrich(state: &AppState, pdf_url: &str, user: &AuthUser) -> Result<Value, AppError> {
    if pdf_url.is_empty() {
        return Err(AppError::InvalidRequest("pdf_url is missing".to_string()));
    }
    info!(subject = %user.subject, pdf_url, "Enriching resume");

    let pdf = state.fetcher.fetch(pdf_url).await?;
    debug!(bytes = pdf.len(), "Fetched PDF");

    let raw_text = state.extractor.extract_text(pdf).await?;
    if raw_text.trim().is_empty() {
        return Err(AppError::Extraction("no extractable text".to_string()));
    }
    debug!(chars = raw_text.len(), "Extracted resume text");

    let prompt = build_resume_prompt(&raw_text);
    let output = state
        .model
        .generate_content(&prompt)
        .await
        .map_err(|e| match e {
            // No readable text: reported like unparseable output.
            ModelError::EmptyContent => AppError::Parse(ModelError::EmptyContent.to_string()),
            other => AppError::Model(other),
        })?;

    let mut applicant = parse_model_output(&output)?;
    flag_schema_drift(&applicant);

    for field in ENCRYPTED_FIELDS {
        encrypt_field(&mut applicant, field, state.cipher.as_ref())?;
    }

    let data = Value::Object(applicant);
    let row = state
        .store
        .save(NewApplicant {
            data: &data,
            submitted_by: &user.subject,
            source_url: pdf_url,
        })
        .await?;
    info!(applicant_id = %row.id, "Persisted applicant");

    Ok(data)
}

/// Strips code fences and parses the model's text as a JSON object.
pub fn parse_model_output(output: &str) -> Result<Map<String, Value>, AppError> {
    let cleaned = strip_json_fences(output);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        // Valid JSON of the wrong kind is not a parse failure.
        Ok(other) => Err(AppError::Internal(anyhow!(
            "model output is {}, expected a JSON object",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::Parse(e.to_string())),
    }
}

/// Replaces a truthy field with its ciphertext. Absent, `null`, `""`, `false`
/// and `0` are left untouched and never reach the cipher.
pub fn encrypt_field(
    applicant: &mut Map<String, Value>,
    field: &str,
    cipher: &dyn FieldCipher,
) -> Result<(), CryptoError> {
    let Some(value) = applicant.get_mut(field) else {
        return Ok(());
    };

    let plaintext = match &*value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Null | Value::Bool(false) | Value::String(_) => return Ok(()),
        Value::Number(n) if n.as_f64() == Some(0.0) => return Ok(()),
        other => other.to_string(),
    };

    *value = Value::String(cipher.encrypt(&plaintext)?);
    Ok(())
}

fn flag_schema_drift(applicant: &Map<String, Value>) {
    if let Err(e) = serde_json::from_value::<ApplicantRecord>(Value::Object(applicant.clone())) {
        warn!("Model output does not match the applicant schema: {e}");
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
