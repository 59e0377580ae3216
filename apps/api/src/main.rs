mod auth;
mod config;
mod crypto;
mod db;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::crypto::AesGcmCipher;
use crate::db::create_pool;
use crate::enrichment::extract::PdfTextExtractor;
use crate::enrichment::fetch::HttpPdfFetcher;
use crate::enrichment::store::PgApplicantStore;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting enricher v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    let cipher = AesGcmCipher::from_base64_key(&config.encryption_key)
        .context("ENCRYPTION_KEY must be 32 bytes of base64")?;

    // Initialize Gemini client
    let model = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
    );
    info!("Gemini client initialized (model: {})", model.model());

    // Build app state
    let state = AppState {
        fetcher: Arc::new(HttpPdfFetcher::new()),
        extractor: Arc::new(PdfTextExtractor),
        model: Arc::new(model),
        cipher: Arc::new(cipher),
        store: Arc::new(PgApplicantStore::new(db)),
        tokens: TokenVerifier::new(&config.jwt_secret),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
