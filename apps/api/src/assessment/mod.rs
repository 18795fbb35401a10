// Skill assessment: question bank, answer scoring, progress projection, feedback.
// Scoring, question lookup and projection are synchronous and free of I/O;
// handlers.rs is the HTTP surface over them.

pub mod feedback;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod question_bank;
pub mod scoring;

pub use models::AssessmentError;
pub use question_bank::QuestionBank;
pub use scoring::ScoringEngine;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Utc;

    use super::models::{Answer, Question, ScoredAnswer};
    use super::progress::{project_result, PerformanceTier};
    use super::*;
    use crate::skills::{KeywordCatalog, SkillExtractor};

    fn long_answer(skill: &str) -> String {
        let body = format!(
            "In production I used {skill} behind a well tested api, paying attention to \
             performance, security and database access patterns. "
        );
        body.repeat(6)
    }

    #[tokio::test]
    async fn test_resume_to_full_marks() {
        let extractor = SkillExtractor::new(Arc::new(KeywordCatalog::default()));
        let bank = QuestionBank::default();
        let engine = ScoringEngine::default();

        let skills = extractor
            .extract("Experienced with Python, JavaScript and SQL")
            .await
            .skills;
        let questions = bank.questions_for(&skills);
        assert_eq!(questions.len(), 3);

        let scored: Vec<ScoredAnswer> = questions
            .iter()
            .map(|q| {
                let answer = Answer {
                    question_skill: q.skill.clone(),
                    text: long_answer(&q.skill),
                    submitted_at: Utc::now(),
                };
                assert!(answer.text.chars().count() >= 500);
                engine.score(&answer, q).unwrap()
            })
            .collect();

        for (s, q) in scored.iter().zip(&questions) {
            assert_eq!(s.points_awarded, q.max_points);
        }

        let by_skill: HashMap<String, Question> = questions
            .into_iter()
            .map(|q| (q.skill.clone(), q))
            .collect();
        let result = project_result(&scored, &by_skill).unwrap();

        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.total_score, result.total_possible);
        assert_eq!(result.tier, PerformanceTier::Expert);
    }
}
