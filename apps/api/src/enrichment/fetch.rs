use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF host returned status {status}")]
    Status { status: u16 },
}

/// Downloads the raw bytes behind a resume URL.
#[async_trait]
pub trait PdfFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Single GET per call, no retry.
#[derive(Clone, Default)]
pub struct HttpPdfFetcher {
    client: Client,
}

impl HttpPdfFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PdfFetcher for HttpPdfFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
