use std::sync::Arc;

use crate::assessment::{QuestionBank, ScoringEngine};
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Owns the keyword catalog and the optional remote analyzer.
    pub extractor: SkillExtractor,
    pub question_bank: Arc<QuestionBank>,
    pub scoring: Arc<ScoringEngine>,
}
