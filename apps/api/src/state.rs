use std::sync::Arc;

use crate::matching::scorer::ResumeScorer;
use crate::matching::store::MatchStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators are trait objects constructed once at startup, so tests
/// can substitute in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub scorer: Arc<dyn ResumeScorer>,
}
