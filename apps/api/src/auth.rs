//! Bearer-token authentication for the enrichment API.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "No token provided",
            AuthError::InvalidToken(_) => "Invalid token",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller, inserted into request extensions by [`verify_token`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

/// HS256 verifier built once from `JWT_SECRET`.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }
}

/// Rejects requests without a valid `Authorization: Bearer` token.
pub async fn verify_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        warn!("Rejected bearer token: {e}");
        e
    })?;

    request
        .extensions_mut()
        .insert(AuthUser { subject: claims.sub });
    Ok(next.run(request).await)
}

#[cfg(test)]
pub fn issue_test_token(secret: &str, subject: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let exp = (chrono::Utc::now().timestamp() + ttl_secs).max(0) as usize;
    encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: subject.to_string(),
            exp,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
