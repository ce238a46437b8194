use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

/// The persisted score for one (job, resume) pair. At most one row per pair;
/// rescoring updates the row in place and refreshes `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRecordRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub match_percentage: i32,
    pub match_explanation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write-side shape for the match upsert. Timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewMatchRecord {
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub match_percentage: i32,
    pub match_explanation: String,
}

/// A scored resume as returned to callers, with the resume's own fields
/// inlined next to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResume {
    #[serde(flatten)]
    pub resume: ResumeRow,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: i32,
    #[serde(rename = "matchExplanation")]
    pub match_explanation: String,
}
