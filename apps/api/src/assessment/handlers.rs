//! Axum route handlers for the Skills and Assessment API.

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::feedback::{analyze_quality, assessment_feedback, ResponseQuality};
use crate::assessment::models::{Answer, Question, ScoredAnswer};
use crate::assessment::progress::{project_result, AssessmentResult};
use crate::assessment::scoring::ScoreBreakdown;
use crate::errors::AppError;
use crate::skills::{ExtractionSource, SkillCategory, SkillSet};
use crate::state::AppState;

const MAX_RESUME_CHARS: usize = 100_000;
const MAX_ANSWER_CHARS: usize = 20_000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: SkillSet,
    pub source: ExtractionSource,
    pub categories: BTreeMap<SkillCategory, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct StartAssessmentResponse {
    pub skills: SkillSet,
    pub source: ExtractionSource,
    pub categories: BTreeMap<SkillCategory, Vec<String>>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub assessment_id: Uuid,
    pub scored_answers: Vec<ScoredAnswer>,
    pub breakdowns: Vec<ScoreBreakdown>,
    pub result: AssessmentResult,
    pub quality: ResponseQuality,
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Extracts canonical skills from resume text, grouped by category as well.
/// Empty text yields an empty list.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    check_resume_length(&request.resume_text)?;

    let extraction = state.extractor.extract(&request.resume_text).await;
    let categories = state.extractor.categorize(&extraction.skills);

    Ok(Json(ExtractResponse {
        skills: extraction.skills,
        source: extraction.source,
        categories,
    }))
}

/// GET /api/v1/questions/:skill
///
/// Always returns a question; unknown skills get the generic template.
pub async fn handle_get_question(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Json<Question> {
    Json(state.question_bank.question_for(&skill))
}

/// POST /api/v1/assessments
///
/// Extracts skills and returns one question per skill.
pub async fn handle_start_assessment(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<StartAssessmentResponse>, AppError> {
    check_resume_length(&request.resume_text)?;

    let extraction = state.extractor.extract(&request.resume_text).await;
    let categories = state.extractor.categorize(&extraction.skills);
    let questions = state.question_bank.questions_for(&extraction.skills);

    Ok(Json(StartAssessmentResponse {
        skills: extraction.skills,
        source: extraction.source,
        categories,
        questions,
    }))
}

/// POST /api/v1/assessments/score
///
/// Scores each answer against the bank's question for its skill and projects
/// the overall result, with quality indicators and written feedback.
/// One answer per skill.
pub async fn handle_score_assessment(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if let Some(long) = request
        .answers
        .iter()
        .find(|a| a.text.chars().count() > MAX_ANSWER_CHARS)
    {
        return Err(AppError::Validation(format!(
            "answer for '{}' exceeds {MAX_ANSWER_CHARS} characters",
            long.question_skill
        )));
    }

    let mut questions: HashMap<String, Question> = HashMap::new();
    let mut breakdowns = Vec::with_capacity(request.answers.len());

    for answer in &request.answers {
        let question = state.question_bank.question_for(&answer.question_skill);
        breakdowns.push(state.scoring.breakdown(answer, &question)?);
        questions.insert(question.skill.clone(), question);
    }

    let scored_answers: Vec<ScoredAnswer> =
        breakdowns.iter().map(ScoreBreakdown::scored_answer).collect();
    let result = project_result(&scored_answers, &questions)?;
    let quality = analyze_quality(&breakdowns);
    let feedback = assessment_feedback(result.percentage, &breakdowns, &quality);

    let assessment_id = Uuid::new_v4();
    tracing::info!(
        "Assessment {assessment_id} scored: {}/{} ({:.1}%)",
        result.total_score,
        result.total_possible,
        result.percentage
    );

    Ok(Json(ScoreResponse {
        assessment_id,
        scored_answers,
        breakdowns,
        result,
        quality,
        feedback,
    }))
}

fn check_resume_length(text: &str) -> Result<(), AppError> {
    if text.chars().count() > MAX_RESUME_CHARS {
        return Err(AppError::Validation(format!(
            "resume_text exceeds {MAX_RESUME_CHARS} characters"
        )));
    }
    Ok(())
}
