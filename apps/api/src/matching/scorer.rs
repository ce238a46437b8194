//! Pluggable resume scorer — measures one resume against a job posting.
//!
//! Default backend: `LlmResumeScorer` (Claude call with rate-limit retry).
//! A backend that returns `None` could not produce a score; the orchestrator
//! degrades to the keyword matcher in `fallback.rs`.
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`, constructed once at startup.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json_object, LlmClient};

/// Score and explanation for one (job, resume) pair, from any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAnalysis {
    pub match_percentage: i32,
    pub explanation: String,
}

/// A scoring backend. Implement this to swap backends without touching the
/// orchestrator or handler code.
#[async_trait]
pub trait ResumeScorer: Send + Sync {
    /// Returns `None` when no score could be produced (transport failure,
    /// non-retryable API error, or retries exhausted). Never errors.
    async fn score(&self, prompt: &str, resume_id: Uuid) -> Option<MatchAnalysis>;
}

/// Scores by asking Claude for a `{matchPercentage, explanation}` object.
pub struct LlmResumeScorer(pub LlmClient);

#[async_trait]
impl ResumeScorer for LlmResumeScorer {
    async fn score(&self, prompt: &str, resume_id: Uuid) -> Option<MatchAnalysis> {
        match self.0.call(prompt, JSON_ONLY_SYSTEM).await {
            Ok(response) => {
                let text = response.text().unwrap_or_default();
                Some(parse_analysis(text))
            }
            Err(e) => {
                warn!("Scoring call failed for resume {resume_id}: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(rename = "matchPercentage")]
    match_percentage: Option<f64>,
    explanation: Option<String>,
}

/// Best-effort extraction of the analysis object from free-form model output.
/// The model is not contract-bound to return pure JSON, so parse trouble
/// degrades to a zero score rather than an error.
fn parse_analysis(text: &str) -> MatchAnalysis {
    let parse_failure = || MatchAnalysis {
        match_percentage: 0,
        explanation: "Failed to parse response".to_string(),
    };

    let Some(object) = extract_json_object(text) else {
        warn!("Scoring reply contained no JSON object");
        return parse_failure();
    };

    match serde_json::from_str::<RawAnalysis>(object) {
        Ok(raw) => MatchAnalysis {
            match_percentage: raw
                .match_percentage
                .map(|p| p.round() as i32)
                .unwrap_or(0)
                .clamp(0, 100),
            explanation: raw
                .explanation
                .unwrap_or_else(|| "No explanation provided".to_string()),
        },
        Err(e) => {
            warn!("Could not parse scoring reply as JSON: {e}");
            parse_failure()
        }
    }
}
