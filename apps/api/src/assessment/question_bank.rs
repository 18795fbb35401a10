//! Question Bank — one quiz question per skill, total over any skill name.

use std::collections::HashMap;

use crate::assessment::models::{Difficulty, Question};
use crate::skills::SkillSet;

const GENERIC_POINTS: u32 = 15;
const GENERIC_TIME_LIMIT_SECONDS: u32 = 240;

struct Template {
    skill: &'static str,
    prompt: &'static str,
    difficulty: Difficulty,
    points: u32,
    time_limit_seconds: u32,
}

const DEFAULT_TEMPLATES: &[Template] = &[
    Template {
        skill: "python",
        prompt: "Explain the difference between lists and tuples in Python. When would you use each?",
        difficulty: Difficulty::Intermediate,
        points: 15,
        time_limit_seconds: 180,
    },
    Template {
        skill: "javascript",
        prompt: "What is event delegation in JavaScript and why is it useful for performance?",
        difficulty: Difficulty::Intermediate,
        points: 15,
        time_limit_seconds: 180,
    },
    Template {
        skill: "react",
        prompt: "Explain the concept of Virtual DOM in React and how it improves performance.",
        difficulty: Difficulty::Intermediate,
        points: 20,
        time_limit_seconds: 240,
    },
    Template {
        skill: "sql",
        prompt: "Write a SQL query to find the second highest salary from an employees table.",
        difficulty: Difficulty::Intermediate,
        points: 18,
        time_limit_seconds: 200,
    },
    Template {
        skill: "api",
        prompt: "What is the difference between REST and GraphQL APIs? When would you choose one over the other?",
        difficulty: Difficulty::Advanced,
        points: 22,
        time_limit_seconds: 300,
    },
    Template {
        skill: "java",
        prompt: "Compare interfaces and abstract classes in Java. When is each the better choice?",
        difficulty: Difficulty::Intermediate,
        points: 15,
        time_limit_seconds: 180,
    },
    Template {
        skill: "git",
        prompt: "Explain the difference between merge and rebase in Git, and when you would avoid rebasing.",
        difficulty: Difficulty::Beginner,
        points: 10,
        time_limit_seconds: 150,
    },
    Template {
        skill: "docker",
        prompt: "How do image layers work in Docker, and how would you keep an image small?",
        difficulty: Difficulty::Intermediate,
        points: 18,
        time_limit_seconds: 200,
    },
];

/// Immutable skill → question table. Built once at startup and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: HashMap<String, Question>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATES.iter().map(|t| Question {
            skill: t.skill.to_string(),
            prompt: t.prompt.to_string(),
            max_points: t.points,
            time_limit_seconds: t.time_limit_seconds,
            difficulty: t.difficulty,
        }))
    }
}

impl QuestionBank {
    /// Builds a bank keyed by lower-cased skill. Later entries replace earlier ones;
    /// entries with a zero point value or time limit are skipped.
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        let questions = questions
            .into_iter()
            .filter(|q| q.validate().is_ok())
            .map(|mut q| {
                q.skill = q.skill.trim().to_lowercase();
                (q.skill.clone(), q)
            })
            .collect();
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the catalog question for `skill`, or a generic one if none exists.
    pub fn question_for(&self, skill: &str) -> Question {
        let key = skill.trim().to_lowercase();
        match self.questions.get(&key) {
            Some(question) => question.clone(),
            None => generic_question(&key),
        }
    }

    /// One question per skill, in the skill set's order.
    pub fn questions_for(&self, skills: &SkillSet) -> Vec<Question> {
        skills.iter().map(|s| self.question_for(s)).collect()
    }
}

fn generic_question(skill: &str) -> Question {
    let label = if skill.is_empty() { "programming" } else { skill };
    Question {
        skill: skill.to_string(),
        prompt: format!(
            "Describe your experience with {label}: a problem you solved with it, \
             the approach you took, and what you would do differently."
        ),
        max_points: GENERIC_POINTS,
        time_limit_seconds: GENERIC_TIME_LIMIT_SECONDS,
        difficulty: Difficulty::Intermediate,
    }
}
