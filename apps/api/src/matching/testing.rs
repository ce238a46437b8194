//! In-memory store and scorer fakes shared across unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::matching::scorer::{MatchAnalysis, ResumeScorer};
use crate::matching::store::MatchStore;
use crate::models::job::JobRow;
use crate::models::match_record::{MatchRecordRow, NewMatchRecord};
use crate::models::resume::ResumeRow;

pub fn job_with_skills(skills: &[&str]) -> JobRow {
    let now = Utc::now();
    JobRow {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        title: "Software Engineer".to_string(),
        company: "Acme".to_string(),
        description: "Build things".to_string(),
        requirements: "Ship working software".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        location: Some("Remote".to_string()),
        location_type: Some("Remote".to_string()),
        salary_min: Some(90_000),
        salary_max: Some(140_000),
        employment_type: Some("Full-time".to_string()),
        experience_level: Some("Mid".to_string()),
        created_at: now,
        updated_at: now,
    }
}

pub fn resume_with_skills(skills: &[&str]) -> ResumeRow {
    let now = Utc::now();
    ResumeRow {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        full_name: "Jordan Doe".to_string(),
        email: "jordan@example.com".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience: "5 years of backend work".to_string(),
        education: "BSc Computer Science".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// In-memory `MatchStore`. Upserts land in `matches` keyed by
/// (job_id, resume_id), mirroring the unique pair constraint.
#[derive(Default)]
pub struct FakeStore {
    pub job: Option<JobRow>,
    pub resumes: Vec<ResumeRow>,
    pub matches: Mutex<HashMap<(Uuid, Uuid), MatchRecordRow>>,
    pub fail_resume_listing: bool,
    pub fail_upserts: bool,
}

impl FakeStore {
    pub fn with_job(job: JobRow) -> Self {
        Self {
            job: Some(job),
            ..Self::default()
        }
    }

    /// Plants a match record whose `updated_at` lies `age` in the past.
    pub fn seed_match(&self, job_id: Uuid, resume_id: Uuid, percentage: i32, age: Duration) {
        let stamped = Utc::now() - age;
        self.matches.lock().unwrap().insert(
            (job_id, resume_id),
            MatchRecordRow {
                id: Uuid::new_v4(),
                job_id,
                resume_id,
                match_percentage: percentage,
                match_explanation: Some(format!("seeded at {percentage}")),
                created_at: stamped,
                updated_at: stamped,
            },
        );
    }
}

#[async_trait]
impl MatchStore for FakeStore {
    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<JobRow>> {
        Ok(self.job.clone().filter(|j| j.id == job_id))
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>> {
        if self.fail_resume_listing {
            bail!("resume listing unavailable");
        }
        Ok(self.resumes.clone())
    }

    async fn list_matches_for_job(&self, job_id: Uuid) -> Result<Vec<MatchRecordRow>> {
        let mut rows: Vec<MatchRecordRow> = self
            .matches
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.job_id == job_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        Ok(rows)
    }

    async fn list_matches_for_resume(&self, resume_id: Uuid) -> Result<Vec<MatchRecordRow>> {
        let mut rows: Vec<MatchRecordRow> = self
            .matches
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.resume_id == resume_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        Ok(rows)
    }

    async fn upsert_match(&self, record: &NewMatchRecord) -> Result<()> {
        if self.fail_upserts {
            bail!("write rejected");
        }
        let now = Utc::now();
        let mut matches = self.matches.lock().unwrap();
        matches
            .entry((record.job_id, record.resume_id))
            .and_modify(|existing| {
                existing.match_percentage = record.match_percentage;
                existing.match_explanation = Some(record.match_explanation.clone());
                existing.updated_at = now;
            })
            .or_insert_with(|| MatchRecordRow {
                id: Uuid::new_v4(),
                job_id: record.job_id,
                resume_id: record.resume_id,
                match_percentage: record.match_percentage,
                match_explanation: Some(record.match_explanation.clone()),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }
}

/// Scripted `ResumeScorer`. Pops queued responses first, then repeats the
/// standing response. Counts every call.
pub struct FakeScorer {
    queued: Mutex<VecDeque<Option<MatchAnalysis>>>,
    standing: Option<MatchAnalysis>,
    pub calls: AtomicUsize,
}

impl FakeScorer {
    /// Always returns the given analysis.
    pub fn always(analysis: MatchAnalysis) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            standing: Some(analysis),
            calls: AtomicUsize::new(0),
        }
    }

    /// Never produces a score, like a scorer whose retries are exhausted.
    pub fn never() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            standing: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the given responses in order, then `None`.
    pub fn sequence(responses: Vec<Option<MatchAnalysis>>) -> Self {
        Self {
            queued: Mutex::new(responses.into()),
            standing: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ResumeScorer for FakeScorer {
    async fn score(&self, _prompt: &str, _resume_id: Uuid) -> Option<MatchAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.queued.lock().unwrap().pop_front() {
            return next;
        }
        self.standing.clone()
    }
}
