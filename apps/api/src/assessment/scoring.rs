//! Scoring Engine — deterministic heuristic score for a free-text answer.
//!
//! points = max_points × base_fraction
//!        + keyword_points × distinct technical keywords
//!        + max_points × long_bonus_fraction       (length > long_answer_chars)
//!        + max_points × very_long_bonus_fraction  (length > very_long_answer_chars)
//!
//! clamped to [0, max_points] and rounded. Answers shorter than
//! `min_answer_chars` score 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assessment::models::{Answer, AssessmentError, Question, ScoredAnswer};

const TECHNICAL_KEYWORDS: &[&str] = &[
    "algorithm",
    "database",
    "framework",
    "api",
    "testing",
    "debugging",
    "optimization",
    "architecture",
    "scalability",
    "performance",
    "security",
    "agile",
    "git",
    "deployment",
    "containerization",
    "microservices",
    "devops",
    "ci/cd",
    "monitoring",
    "logging",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Trimmed answers shorter than this (in characters) score zero.
    pub min_answer_chars: usize,
    pub base_fraction: f64,
    pub keyword_points: f64,
    pub long_answer_chars: usize,
    pub long_bonus_fraction: f64,
    pub very_long_answer_chars: usize,
    pub very_long_bonus_fraction: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            min_answer_chars: 20,
            base_fraction: 0.6,
            keyword_points: 2.0,
            long_answer_chars: 200,
            long_bonus_fraction: 0.2,
            very_long_answer_chars: 500,
            very_long_bonus_fraction: 0.2,
        }
    }
}

/// How an answer's points were derived. Bonus fields are pre-clamp values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub question_skill: String,
    pub answer_length: usize,
    pub below_minimum: bool,
    pub base_points: f64,
    pub keyword_bonus: f64,
    pub length_bonus: f64,
    pub matched_keywords: Vec<String>,
    pub max_points: u32,
    pub points_awarded: u32,
}

impl ScoreBreakdown {
    pub fn scored_answer(&self) -> ScoredAnswer {
        ScoredAnswer {
            question_skill: self.question_skill.clone(),
            points_awarded: self.points_awarded,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, answer: &Answer, question: &Question) -> Result<ScoredAnswer, AssessmentError> {
        self.breakdown(answer, question).map(|b| b.scored_answer())
    }

    pub fn breakdown(
        &self,
        answer: &Answer,
        question: &Question,
    ) -> Result<ScoreBreakdown, AssessmentError> {
        question.validate()?;
        if !same_skill(&answer.question_skill, &question.skill) {
            return Err(AssessmentError::InvalidInput(format!(
                "answer for '{}' cannot be scored against question for '{}'",
                answer.question_skill, question.skill
            )));
        }

        let w = &self.weights;
        let text = answer.text.trim();
        let answer_length = text.chars().count();
        let max = f64::from(question.max_points);

        if answer_length < w.min_answer_chars {
            return Ok(ScoreBreakdown {
                question_skill: question.skill.clone(),
                answer_length,
                below_minimum: true,
                base_points: 0.0,
                keyword_bonus: 0.0,
                length_bonus: 0.0,
                matched_keywords: vec![],
                max_points: question.max_points,
                points_awarded: 0,
            });
        }

        let matched_keywords = find_keywords(text);
        let base_points = max * w.base_fraction;
        let keyword_bonus = w.keyword_points * matched_keywords.len() as f64;

        let mut length_bonus = 0.0;
        if answer_length > w.long_answer_chars {
            length_bonus += max * w.long_bonus_fraction;
        }
        if answer_length > w.very_long_answer_chars {
            length_bonus += max * w.very_long_bonus_fraction;
        }

        let raw = base_points + keyword_bonus + length_bonus;
        let points_awarded = raw.clamp(0.0, max).round() as u32;

        debug!(
            "Scored '{}': length={answer_length}, keywords={}, raw={raw:.2}, awarded={points_awarded}/{}",
            question.skill,
            matched_keywords.len(),
            question.max_points
        );

        Ok(ScoreBreakdown {
            question_skill: question.skill.clone(),
            answer_length,
            below_minimum: false,
            base_points,
            keyword_bonus,
            length_bonus,
            matched_keywords,
            max_points: question.max_points,
            points_awarded,
        })
    }
}

fn same_skill(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Distinct technical keywords present in `text`, in keyword-list order.
/// Plain substring matching, so plurals and inflections count.
fn find_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TECHNICAL_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::Difficulty;
    use chrono::{TimeZone, Utc};

    fn question(max_points: u32) -> Question {
        Question {
            skill: "python".to_string(),
            prompt: "Explain lists vs tuples.".to_string(),
            max_points,
            time_limit_seconds: 180,
            difficulty: Difficulty::Intermediate,
        }
    }

    fn answer(text: &str) -> Answer {
        Answer {
            question_skill: "python".to_string(),
            text: text.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn plain_text(len: usize) -> String {
        "lists are mutable ".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_short_answer_scores_zero() {
        let engine = ScoringEngine::default();
        let b = engine.breakdown(&answer("   too short    "), &question(15)).unwrap();
        assert!(b.below_minimum);
        assert_eq!(b.points_awarded, 0);
    }

    #[test]
    fn test_base_score_only() {
        let engine = ScoringEngine::default();
        // 40 chars, no keywords: 15 * 0.6 = 9
        let scored = engine.score(&answer(&plain_text(40)), &question(15)).unwrap();
        assert_eq!(scored.points_awarded, 9);
    }

    #[test]
    fn test_keyword_bonus_counts_distinct_keywords() {
        let engine = ScoringEngine::default();
        let text = "Good testing and testing again improves performance a lot";
        let b = engine.breakdown(&answer(text), &question(20)).unwrap();
        assert_eq!(b.matched_keywords, vec!["testing", "performance"]);
        // 20 * 0.6 + 2 * 2 = 16
        assert_eq!(b.points_awarded, 16);
    }

    #[test]
    fn test_length_bonuses_apply_above_thresholds() {
        let engine = ScoringEngine::default();
        let q = question(20);

        let at_200 = engine.breakdown(&answer(&plain_text(200)), &q).unwrap();
        assert_eq!(at_200.length_bonus, 0.0);

        let over_200 = engine.breakdown(&answer(&plain_text(201)), &q).unwrap();
        assert!((over_200.length_bonus - 4.0).abs() < f64::EPSILON);
        assert_eq!(over_200.points_awarded, 16);

        let over_500 = engine.breakdown(&answer(&plain_text(501)), &q).unwrap();
        assert!((over_500.length_bonus - 8.0).abs() < f64::EPSILON);
        assert_eq!(over_500.points_awarded, 20);
    }

    #[test]
    fn test_score_is_clamped_to_max_points() {
        let engine = ScoringEngine::default();
        let text = format!(
            "{} algorithm database framework api testing debugging security",
            plain_text(600)
        );
        let scored = engine.score(&answer(&text), &question(15)).unwrap();
        assert_eq!(scored.points_awarded, 15);
    }

    #[test]
    fn test_points_always_within_bounds() {
        let engine = ScoringEngine::default();
        for max in [1, 2, 7, 15, 100] {
            for len in [0, 19, 20, 150, 201, 499, 501, 2000] {
                let text = format!("{} api git", plain_text(len));
                let scored = engine.score(&answer(&text), &question(max)).unwrap();
                assert!(scored.points_awarded <= max, "max={max} len={len}");
            }
        }
    }

    #[test]
    fn test_rounding_to_nearest_integer() {
        let engine = ScoringEngine::default();
        // 7 * 0.6 = 4.2 → 4
        assert_eq!(
            engine.score(&answer(&plain_text(30)), &question(7)).unwrap().points_awarded,
            4
        );
        // 9 * 0.6 + 2 = 7.4 → 7
        let text = format!("{} security", plain_text(30));
        assert_eq!(
            engine.score(&answer(&text), &question(9)).unwrap().points_awarded,
            7
        );
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let engine = ScoringEngine::default();
        let a = answer("Use tuples for fixed records and lists for growing collections; testing matters.");
        let q = question(15);
        assert_eq!(engine.score(&a, &q).unwrap(), engine.score(&a, &q).unwrap());
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let engine = ScoringEngine::new(ScoringWeights {
            min_answer_chars: 5,
            base_fraction: 0.5,
            keyword_points: 0.0,
            ..ScoringWeights::default()
        });
        let scored = engine.score(&answer("testing api"), &question(10)).unwrap();
        assert_eq!(scored.points_awarded, 5);
    }

    #[test]
    fn test_mismatched_skill_is_invalid_input() {
        let engine = ScoringEngine::default();
        let mut a = answer(&plain_text(50));
        a.question_skill = "sql".to_string();
        assert!(matches!(
            engine.score(&a, &question(15)),
            Err(AssessmentError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_skill_comparison_ignores_case() {
        let engine = ScoringEngine::default();
        let mut a = answer(&plain_text(50));
        a.question_skill = " Python ".to_string();
        assert!(engine.score(&a, &question(15)).is_ok());
    }

    #[test]
    fn test_zero_point_question_is_invalid_input() {
        let engine = ScoringEngine::default();
        assert!(engine.score(&answer(&plain_text(50)), &question(0)).is_err());
    }
}
