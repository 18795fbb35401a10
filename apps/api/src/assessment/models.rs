use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input errors raised by the assessment core. Expected conditions (unknown skill,
/// empty text, no answers) are not errors and never produce one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub skill: String,
    pub prompt: String,
    pub max_points: u32,
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Question {
    /// Rejects questions that cannot be scored.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.max_points == 0 {
            return Err(AssessmentError::InvalidInput(format!(
                "question for '{}' has max_points = 0",
                self.skill
            )));
        }
        if self.time_limit_seconds == 0 {
            return Err(AssessmentError::InvalidInput(format!(
                "question for '{}' has time_limit_seconds = 0",
                self.skill
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_skill: String,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_skill: String,
    pub points_awarded: u32,
}
