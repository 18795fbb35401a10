//! Progress Projector — aggregates scored answers into an `AssessmentResult`.
//! Pure aggregation; no I/O.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::assessment::models::{AssessmentError, Question, ScoredAnswer};

const MAX_RECOMMENDATIONS: usize = 5;

/// Coarse overall level derived from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Expert,
    Advanced,
    Intermediate,
    BeginnerPlus,
    Beginner,
}

impl PerformanceTier {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Self::Expert,
            p if p >= 80.0 => Self::Advanced,
            p if p >= 65.0 => Self::Intermediate,
            p if p >= 50.0 => Self::BeginnerPlus,
            _ => Self::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Proficient,
    Intermediate,
    Beginner,
}

impl SkillLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 80.0 => Self::Proficient,
            p if p >= 60.0 => Self::Intermediate,
            _ => Self::Beginner,
        }
    }
}

/// Immutable snapshot of one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub skill_scores: BTreeMap<String, u32>,
    /// Summed in `u64` so any number of `u32` questions fits.
    pub total_score: u64,
    pub total_possible: u64,
    /// 0.0 – 100.0; 0.0 when nothing was possible.
    pub percentage: f64,
    pub tier: PerformanceTier,
    pub skill_levels: BTreeMap<String, SkillLevel>,
    pub recommendations: Vec<String>,
}

/// Projects scored answers onto their questions.
///
/// `questions` is keyed by skill (case-insensitive). Questions without a scored
/// answer do not count toward `total_possible`.
pub fn project_result(
    scored_answers: &[ScoredAnswer],
    questions: &HashMap<String, Question>,
) -> Result<AssessmentResult, AssessmentError> {
    let by_skill: HashMap<String, &Question> = questions
        .iter()
        .map(|(skill, q)| (skill.trim().to_lowercase(), q))
        .collect();

    let mut skill_scores = BTreeMap::new();
    let mut skill_levels = BTreeMap::new();
    let mut total_score = 0u64;
    let mut total_possible = 0u64;

    for scored in scored_answers {
        let skill = scored.question_skill.trim().to_lowercase();

        let question = by_skill.get(&skill).ok_or_else(|| {
            AssessmentError::InvalidInput(format!("no question for scored skill '{skill}'"))
        })?;
        question.validate()?;

        if scored.points_awarded > question.max_points {
            return Err(AssessmentError::InvalidInput(format!(
                "'{skill}' awarded {} points but the question is worth {}",
                scored.points_awarded, question.max_points
            )));
        }
        if skill_scores.contains_key(&skill) {
            return Err(AssessmentError::InvalidInput(format!(
                "more than one scored answer for '{skill}'"
            )));
        }

        let skill_pct = percentage_of(
            u64::from(scored.points_awarded),
            u64::from(question.max_points),
        );
        skill_levels.insert(skill.clone(), SkillLevel::from_percentage(skill_pct));
        skill_scores.insert(skill, scored.points_awarded);

        total_score += u64::from(scored.points_awarded);
        total_possible += u64::from(question.max_points);
    }

    let percentage = percentage_of(total_score, total_possible);
    let recommendations = build_recommendations(percentage, &skill_levels);

    Ok(AssessmentResult {
        skill_scores,
        total_score,
        total_possible,
        percentage,
        tier: PerformanceTier::from_percentage(percentage),
        skill_levels,
        recommendations,
    })
}

fn percentage_of(score: u64, possible: u64) -> f64 {
    if possible == 0 {
        return 0.0;
    }
    (100.0 * score as f64 / possible as f64).clamp(0.0, 100.0)
}

fn build_recommendations(
    percentage: f64,
    skill_levels: &BTreeMap<String, SkillLevel>,
) -> Vec<String> {
    let general: &[&str] = if percentage < 60.0 {
        &[
            "Focus on fundamental programming concepts",
            "Practice basic data structures and algorithms",
            "Complete beginner-level coding exercises daily",
        ]
    } else if percentage < 80.0 {
        &[
            "Strengthen intermediate programming skills",
            "Learn about time and space complexity",
            "Practice with real-world coding problems",
        ]
    } else {
        &[
            "Explore advanced algorithms and data structures",
            "Practice system design concepts",
            "Consider contributing to open source projects",
        ]
    };

    let per_skill = skill_levels.iter().filter_map(|(skill, level)| match level {
        SkillLevel::Beginner => Some(format!("Take a comprehensive {skill} course")),
        SkillLevel::Intermediate => Some(format!("Practice advanced {skill} concepts")),
        SkillLevel::Proficient => None,
    });

    general
        .iter()
        .map(|s| s.to_string())
        .chain(per_skill)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
