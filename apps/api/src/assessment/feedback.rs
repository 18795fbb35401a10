//! Response quality indicators and written feedback for a scored assessment.
//! Derived from the per-answer `ScoreBreakdown`s; no I/O.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::assessment::scoring::ScoreBreakdown;

/// Trimmed answers longer than this count as detailed.
const DETAILED_ANSWER_CHARS: usize = 100;
/// Fewer distinct technical keywords than this across all answers earns a suggestion.
const MIN_TECHNICAL_TERMS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseQuality {
    /// Mean trimmed length in characters, rounded down.
    pub average_length: usize,
    pub empty_responses: usize,
    pub detailed_responses: usize,
    /// Distinct technical keywords across all answers.
    pub technical_terms_used: usize,
    pub engagement: Engagement,
}

pub fn analyze_quality(breakdowns: &[ScoreBreakdown]) -> ResponseQuality {
    let total = breakdowns.len();
    let empty = breakdowns.iter().filter(|b| b.answer_length == 0).count();
    let detailed = breakdowns
        .iter()
        .filter(|b| b.answer_length > DETAILED_ANSWER_CHARS)
        .count();
    let total_length: usize = breakdowns.iter().map(|b| b.answer_length).sum();
    let terms: BTreeSet<&str> = breakdowns
        .iter()
        .flat_map(|b| b.matched_keywords.iter().map(String::as_str))
        .collect();

    // an assessment with no answers counts as all-empty
    let engagement = if empty == total {
        Engagement::None
    } else if empty > total / 2 {
        Engagement::Low
    } else if detailed > total / 2 {
        Engagement::High
    } else {
        Engagement::Medium
    };

    ResponseQuality {
        average_length: total_length.checked_div(total).unwrap_or(0),
        empty_responses: empty,
        detailed_responses: detailed,
        technical_terms_used: terms.len(),
        engagement,
    }
}

/// One paragraph: a headline for the percentage band, then any suggestions.
pub fn assessment_feedback(
    percentage: f64,
    breakdowns: &[ScoreBreakdown],
    quality: &ResponseQuality,
) -> String {
    let headline = match percentage {
        p if p >= 90.0 => "Excellent work! Your responses demonstrate strong technical knowledge and attention to detail.",
        p if p >= 80.0 => "Great job! You show solid understanding with room for even more detailed explanations.",
        p if p >= 70.0 => "Good performance! Consider providing more technical details in your responses.",
        p if p >= 60.0 => "Nice effort! Focus on expanding your answers with more specific technical information.",
        _ => "Keep learning! Try to provide more comprehensive responses that demonstrate your technical understanding.",
    };

    let mut suggestions = Vec::new();
    if !breakdowns.is_empty() {
        let with_length_bonus = breakdowns.iter().filter(|b| b.length_bonus > 0.0).count();
        if with_length_bonus * 2 < breakdowns.len() {
            suggestions.push("Provide more detailed explanations in your responses.");
        }
        if quality.technical_terms_used < MIN_TECHNICAL_TERMS {
            suggestions.push("Include more technical terminology to demonstrate your knowledge.");
        }
    }
    if quality.empty_responses > 0 {
        suggestions.push("Try to answer all questions to maximize your score.");
    }

    if suggestions.is_empty() {
        headline.to_string()
    } else {
        format!(
            "{headline} Suggestions for improvement: {}",
            suggestions.join(" ")
        )
    }
}
