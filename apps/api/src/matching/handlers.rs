//! Axum route handlers for the matching API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::orchestrator::match_job_against_resumes;
use crate::models::match_record::{MatchRecordRow, RankedResume};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchResumeRequest {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResumeResponse {
    pub results: Vec<RankedResume>,
}

/// POST /api/v1/match-resume
///
/// Scores every resume in the store against the given job and returns the
/// ranked list. Scores younger than the cache window are reused as-is, so a
/// repeat request is cheap.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Json(request): Json<MatchResumeRequest>,
) -> Result<Json<MatchResumeResponse>, AppError> {
    let raw_id = request.job_id.unwrap_or_default();
    if raw_id.trim().is_empty() {
        return Err(AppError::MissingJobId);
    }
    // A malformed id cannot name any job.
    let job_id = Uuid::parse_str(raw_id.trim()).map_err(|_| AppError::JobNotFound)?;

    let results =
        match_job_against_resumes(state.store.as_ref(), state.scorer.as_ref(), job_id).await?;
    Ok(Json(MatchResumeResponse { results }))
}

/// GET /api/v1/jobs/:job_id/matches
///
/// Stored match records for a job, best score first.
pub async fn handle_list_job_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<MatchRecordRow>>, AppError> {
    let matches = state.store.list_matches_for_job(job_id).await?;
    Ok(Json(matches))
}

/// GET /api/v1/resumes/:resume_id/matches
///
/// Stored match records for a resume, best score first.
pub async fn handle_list_resume_matches(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<MatchRecordRow>>, AppError> {
    let matches = state.store.list_matches_for_resume(resume_id).await?;
    Ok(Json(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::MatchAnalysis;
    use crate::matching::testing::{job_with_skills, resume_with_skills, FakeScorer, FakeStore};
    use crate::routes::build_router;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::Duration;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state_with(store: FakeStore, scorer: FakeScorer) -> AppState {
        AppState {
            store: Arc::new(store),
            scorer: Arc::new(scorer),
        }
    }

    fn post_match(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/match-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: String) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_job_id_is_a_bad_request() {
        let app = build_router(state_with(FakeStore::default(), FakeScorer::never()));

        let response = app.oneshot(post_match(json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Job ID is required" })
        );
    }

    #[tokio::test]
    async fn test_blank_job_id_is_a_bad_request() {
        let app = build_router(state_with(FakeStore::default(), FakeScorer::never()));

        let response = app.oneshot(post_match(json!({ "jobId": "  " }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let app = build_router(state_with(FakeStore::default(), FakeScorer::never()));

        let response = app
            .oneshot(post_match(json!({ "jobId": Uuid::new_v4().to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Failed to fetch job details" })
        );
    }

    #[tokio::test]
    async fn test_malformed_job_id_is_not_found() {
        let app = build_router(state_with(FakeStore::default(), FakeScorer::never()));

        let response = app
            .oneshot(post_match(json!({ "jobId": "not-a-uuid" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_load_failure_is_a_server_error() {
        let job = job_with_skills(&["rust"]);
        let job_id = job.id;
        let mut store = FakeStore::with_job(job);
        store.fail_resume_listing = true;
        let app = build_router(state_with(store, FakeScorer::never()));

        let response = app
            .oneshot(post_match(json!({ "jobId": job_id.to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Failed to fetch resumes" })
        );
    }

    #[tokio::test]
    async fn test_no_resumes_returns_empty_results() {
        let job = job_with_skills(&["rust"]);
        let job_id = job.id;
        let app = build_router(state_with(FakeStore::with_job(job), FakeScorer::never()));

        let response = app
            .oneshot(post_match(json!({ "jobId": job_id.to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "results": [] }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_match_shapes_the_response() {
        let job = job_with_skills(&["rust"]);
        let job_id = job.id;
        let resume = resume_with_skills(&["rust"]);
        let resume_id = resume.id;
        let mut store = FakeStore::with_job(job);
        store.resumes = vec![resume];
        let scorer = FakeScorer::always(MatchAnalysis {
            match_percentage: 88,
            explanation: "Great fit".to_string(),
        });
        let app = build_router(state_with(store, scorer));

        let response = app
            .oneshot(post_match(json!({ "jobId": job_id.to_string() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["matchPercentage"], 88);
        assert_eq!(results[0]["matchExplanation"], "Great fit");
        // resume fields ride along inlined
        assert_eq!(results[0]["id"], resume_id.to_string());
        assert_eq!(results[0]["full_name"], "Jordan Doe");
    }

    #[tokio::test]
    async fn test_job_matches_listing_is_sorted() {
        let store = FakeStore::default();
        let job_id = Uuid::new_v4();
        store.seed_match(job_id, Uuid::new_v4(), 30, Duration::hours(1));
        store.seed_match(job_id, Uuid::new_v4(), 95, Duration::hours(1));
        store.seed_match(Uuid::new_v4(), Uuid::new_v4(), 60, Duration::hours(1));
        let app = build_router(state_with(store, FakeScorer::never()));

        let response = app
            .oneshot(get(format!("/api/v1/jobs/{job_id}/matches")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["match_percentage"], 95);
        assert_eq!(rows[1]["match_percentage"], 30);
    }

    #[tokio::test]
    async fn test_resume_matches_listing_filters_by_resume() {
        let store = FakeStore::default();
        let resume_id = Uuid::new_v4();
        store.seed_match(Uuid::new_v4(), resume_id, 42, Duration::hours(1));
        store.seed_match(Uuid::new_v4(), Uuid::new_v4(), 77, Duration::hours(1));
        let app = build_router(state_with(store, FakeScorer::never()));

        let response = app
            .oneshot(get(format!("/api/v1/resumes/{resume_id}/matches")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["match_percentage"], 42);
    }
}
