//! Runs one job against every resume in the store and assembles the ranked
//! result list.
//!
//! Resumes are processed strictly sequentially: at most one scoring call is
//! in flight, and consecutive calls are spaced out by the `Pacer` to respect
//! the scoring service's rate limit. Concurrent runs for the same job are not
//! mutually excluded; the per-pair upsert is last-write-wins.

use std::collections::HashMap;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::fallback::fallback_match;
use crate::matching::pacing::Pacer;
use crate::matching::prompts::{build_base_prompt, build_scoring_prompt};
use crate::matching::scorer::ResumeScorer;
use crate::matching::store::MatchStore;
use crate::models::match_record::{MatchRecordRow, NewMatchRecord, RankedResume};

/// A stored score younger than this is reused without rescoring.
const FRESHNESS_WINDOW_HOURS: i64 = 48;

/// Minimum gap before the next scoring call after one that produced a score.
const SCORED_CALL_GAP: Duration = Duration::from_millis(1500);
/// Shorter minimum gap after a call that produced no score.
const DEGRADED_CALL_GAP: Duration = Duration::from_secs(1);

/// Scores every resume against the given job, reusing fresh match records and
/// persisting new ones, and returns the list sorted by score descending.
///
/// Fails only when the job cannot be found or the resume set cannot be
/// loaded. A resume never fails individually: if the scoring service yields
/// nothing, the keyword fallback supplies the score, and a failed persist
/// still leaves the computed score in the returned list.
pub async fn match_job_against_resumes(
    store: &dyn MatchStore,
    scorer: &dyn ResumeScorer,
    job_id: Uuid,
) -> Result<Vec<RankedResume>, AppError> {
    let job = match store.fetch_job(job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => return Err(AppError::JobNotFound),
        Err(e) => {
            error!("Failed to load job {job_id}: {e:#}");
            return Err(AppError::JobNotFound);
        }
    };

    let resumes = store.list_resumes().await.map_err(|e| {
        error!("Failed to load resumes: {e:#}");
        AppError::ResumesUnavailable
    })?;
    if resumes.is_empty() {
        return Ok(Vec::new());
    }

    // One bulk read instead of a round trip per resume. Losing the cache is
    // not fatal: everything just gets rescored.
    let cached: HashMap<Uuid, MatchRecordRow> = match store.list_matches_for_job(job_id).await {
        Ok(rows) => rows.into_iter().map(|m| (m.resume_id, m)).collect(),
        Err(e) => {
            warn!("Failed to load existing matches for job {job_id}: {e:#}");
            HashMap::new()
        }
    };

    let base_prompt = build_base_prompt(&job);
    let mut pacer = Pacer::new();
    let mut results = Vec::with_capacity(resumes.len());

    for resume in resumes {
        debug!("Processing resume {} for job {job_id}", resume.id);

        if let Some(existing) = cached.get(&resume.id) {
            if is_fresh(existing.updated_at, Utc::now()) {
                debug!("Reusing cached match for resume {}", resume.id);
                results.push(RankedResume {
                    match_percentage: existing.match_percentage,
                    match_explanation: existing.match_explanation.clone().unwrap_or_default(),
                    resume,
                });
                continue;
            }
        }

        let prompt = build_scoring_prompt(&base_prompt, &resume);

        pacer.wait_ready().await;
        let (analysis, scored) = match scorer.score(&prompt, resume.id).await {
            Some(analysis) => (analysis, true),
            None => {
                info!(
                    "Using fallback matching for resume {} after scoring failure",
                    resume.id
                );
                (fallback_match(&job, &resume), false)
            }
        };
        pacer.arm(if scored {
            SCORED_CALL_GAP
        } else {
            DEGRADED_CALL_GAP
        });

        let record = NewMatchRecord {
            job_id,
            resume_id: resume.id,
            match_percentage: analysis.match_percentage,
            match_explanation: analysis.explanation.clone(),
        };
        if let Err(e) = store.upsert_match(&record).await {
            // The score still goes back to the caller; it just won't be cached.
            error!("Failed to persist match for resume {}: {e:#}", resume.id);
        }

        results.push(RankedResume {
            resume,
            match_percentage: analysis.match_percentage,
            match_explanation: analysis.explanation,
        });
    }

    results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    Ok(results)
}

fn is_fresh(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(updated_at) < ChronoDuration::hours(FRESHNESS_WINDOW_HOURS)
}
