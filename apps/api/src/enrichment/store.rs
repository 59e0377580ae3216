use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::applicant::ApplicantRow;

/// Parameters for inserting a new applicant.
pub struct NewApplicant<'a> {
    pub data: &'a Value,
    pub submitted_by: &'a str,
    pub source_url: &'a str,
}

/// Durable storage for applicant records. Create-only.
#[async_trait]
pub trait ApplicantStore: Send + Sync {
    async fn save(&self, applicant: NewApplicant<'_>) -> Result<ApplicantRow, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgApplicantStore {
    pool: PgPool,
}

impl PgApplicantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicantStore for PgApplicantStore {
    async fn save(&self, applicant: NewApplicant<'_>) -> Result<ApplicantRow, sqlx::Error> {
        sqlx::query_as::<_, ApplicantRow>(
            r#"
            INSERT INTO applicants (id, data, submitted_by, source_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, data, submitted_by, source_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(applicant.data)
        .bind(applicant.submitted_by)
        .bind(applicant.source_url)
        .fetch_one(&self.pool)
        .await
    }
}
