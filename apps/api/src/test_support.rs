//! In-memory collaborators for pipeline and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::crypto::{AesGcmCipher, CryptoError, FieldCipher};
use crate::enrichment::extract::{ExtractError, TextExtractor};
use crate::enrichment::fetch::{FetchError, PdfFetcher};
use crate::enrichment::store::{ApplicantStore, NewApplicant};
use crate::llm_client::{GenerativeModel, ModelError};
use crate::models::applicant::ApplicantRow;
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

pub const JANE_DOE_TEXT: &str =
    "Jane Doe, jane@x.com, BS Computer Science, XYZ University, 2020, Software Engineer at Acme";

pub fn jane_doe_json() -> String {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "education": {
            "degree": "BS",
            "branch": "Computer Science",
            "institution": "XYZ University",
            "year": 2020
        },
        "experience": {
            "job_title": "Software Engineer",
            "company": "Acme"
        },
        "skills": [],
        "summary": "Software Engineer at Acme"
    })
    .to_string()
}

pub struct FakeFetcher {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfFetcher for FakeFetcher {
    async fn fetch(&self, _url: &str) -> Result<Bytes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::Status { status: 404 });
        }
        Ok(Bytes::from_static(b"%PDF-1.4 fake"))
    }
}

pub struct FakeExtractor {
    text: String,
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract_text(&self, _pdf: Bytes) -> Result<String, ExtractError> {
        Ok(self.text.clone())
    }
}

pub struct FakeModel {
    output: Option<String>,
    blocked: bool,
    last_prompt: Mutex<Option<String>>,
}

impl FakeModel {
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.blocked {
            return Err(ModelError::EmptyContent);
        }
        self.output.clone().ok_or(ModelError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

/// Real AES-GCM cipher that counts encryptions.
pub struct RecordingCipher {
    inner: AesGcmCipher,
    calls: AtomicUsize,
}

impl RecordingCipher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FieldCipher for RecordingCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        self.inner.decrypt(ciphertext)
    }
}

pub struct MemoryStore {
    fail: bool,
    rows: Mutex<Vec<ApplicantRow>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<ApplicantRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicantStore for MemoryStore {
    async fn save(&self, applicant: NewApplicant<'_>) -> Result<ApplicantRow, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let row = ApplicantRow {
            id: Uuid::new_v4(),
            data: applicant.data.clone(),
            submitted_by: applicant.submitted_by.to_string(),
            source_url: applicant.source_url.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }
}

/// Builder over the fakes; defaults to the Jane Doe happy path.
pub struct Harness {
    pub fetcher: Arc<FakeFetcher>,
    pub extractor: Arc<FakeExtractor>,
    pub model: Arc<FakeModel>,
    pub cipher: Arc<RecordingCipher>,
    pub store: Arc<MemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            fetcher: Arc::new(FakeFetcher {
                fail: false,
                calls: AtomicUsize::new(0),
            }),
            extractor: Arc::new(FakeExtractor {
                text: JANE_DOE_TEXT.to_string(),
            }),
            model: Arc::new(FakeModel {
                output: Some(jane_doe_json()),
                blocked: false,
                last_prompt: Mutex::new(None),
            }),
            cipher: Arc::new(RecordingCipher {
                inner: AesGcmCipher::new(&[42u8; 32]).unwrap(),
                calls: AtomicUsize::new(0),
            }),
            store: Arc::new(MemoryStore {
                fail: false,
                rows: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn with_extracted_text(mut self, text: &str) -> Self {
        self.extractor = Arc::new(FakeExtractor {
            text: text.to_string(),
        });
        self
    }

    pub fn with_model_output(mut self, output: impl Into<String>) -> Self {
        self.model = Arc::new(FakeModel {
            output: Some(output.into()),
            blocked: false,
            last_prompt: Mutex::new(None),
        });
        self
    }

    pub fn with_model_failure(mut self) -> Self {
        self.model = Arc::new(FakeModel {
            output: None,
            blocked: false,
            last_prompt: Mutex::new(None),
        });
        self
    }

    pub fn with_blocked_model(mut self) -> Self {
        self.model = Arc::new(FakeModel {
            output: None,
            blocked: true,
            last_prompt: Mutex::new(None),
        });
        self
    }

    pub fn with_fetch_failure(mut self) -> Self {
        self.fetcher = Arc::new(FakeFetcher {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        self
    }

    pub fn with_store_failure(mut self) -> Self {
        self.store = Arc::new(MemoryStore {
            fail: true,
            rows: Mutex::new(Vec::new()),
        });
        self
    }

    pub fn state(&self) -> AppState {
        AppState {
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            model: self.model.clone(),
            cipher: self.cipher.clone(),
            store: self.store.clone(),
            tokens: TokenVerifier::new(TEST_JWT_SECRET),
        }
    }
}
