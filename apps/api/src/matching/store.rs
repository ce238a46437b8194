//! Persistence boundary for jobs, resumes, and match records.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::JobRow;
use crate::models::match_record::{MatchRecordRow, NewMatchRecord};
use crate::models::resume::ResumeRow;

/// The relational store consumed by the matcher. Plain CRUD — no transactions
/// or joins. Implemented against Postgres in production; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<JobRow>>;

    /// Every resume in the store is a candidate. Ordering is stable across
    /// calls.
    async fn list_resumes(&self) -> Result<Vec<ResumeRow>>;

    /// All match records for a job, best score first.
    async fn list_matches_for_job(&self, job_id: Uuid) -> Result<Vec<MatchRecordRow>>;

    /// All match records for a resume, best score first.
    async fn list_matches_for_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRecordRow>>;

    /// Insert-or-update keyed on (job_id, resume_id); refreshes `updated_at`.
    /// A single conditional write, so concurrent runs cannot produce duplicate
    /// rows for a pair (last write wins).
    async fn upsert_match(&self, record: &NewMatchRecord) -> Result<()>;
}

pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<JobRow>> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn list_matches_for_job(&self, job_id: Uuid) -> Result<Vec<MatchRecordRow>> {
        Ok(sqlx::query_as::<_, MatchRecordRow>(
            "SELECT * FROM job_resume_matches WHERE job_id = $1 ORDER BY match_percentage DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_matches_for_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRecordRow>> {
        Ok(sqlx::query_as::<_, MatchRecordRow>(
            "SELECT * FROM job_resume_matches WHERE resume_id = $1 ORDER BY match_percentage DESC",
        )
        .bind(resume_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn upsert_match(&self, record: &NewMatchRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO job_resume_matches
                (id, job_id, resume_id, match_percentage, match_explanation, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (job_id, resume_id)
            DO UPDATE SET
                match_percentage = EXCLUDED.match_percentage,
                match_explanation = EXCLUDED.match_explanation,
                updated_at = NOW()
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.job_id)
        .bind(record.resume_id)
        .bind(record.match_percentage)
        .bind(&record.match_explanation)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
