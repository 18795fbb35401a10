use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::assessment::scoring::ScoringWeights;

const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-oss-20b:free";

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When absent the skill analyzer is disabled and extraction is keyword-only.
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub analyzer_timeout: Duration,
    pub scoring: ScoringWeights,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringWeights::default();
        let scoring = ScoringWeights {
            min_answer_chars: parse_env("SCORE_MIN_ANSWER_CHARS", defaults.min_answer_chars)?,
            base_fraction: parse_env("SCORE_BASE_FRACTION", defaults.base_fraction)?,
            keyword_points: parse_env("SCORE_KEYWORD_POINTS", defaults.keyword_points)?,
            long_answer_chars: parse_env("SCORE_LONG_ANSWER_CHARS", defaults.long_answer_chars)?,
            long_bonus_fraction: parse_env(
                "SCORE_LONG_BONUS_FRACTION",
                defaults.long_bonus_fraction,
            )?,
            very_long_answer_chars: parse_env(
                "SCORE_VERY_LONG_ANSWER_CHARS",
                defaults.very_long_answer_chars,
            )?,
            very_long_bonus_fraction: parse_env(
                "SCORE_VERY_LONG_BONUS_FRACTION",
                defaults.very_long_bonus_fraction,
            )?,
        };

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            openrouter_base_url: optional_env("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            openrouter_model: optional_env("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
            analyzer_timeout: Duration::from_secs(parse_env("ANALYZER_TIMEOUT_SECS", 5u64)?),
            scoring,
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Returns the variable's value, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("MAVERICKS_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("MAVERICKS_TEST_GARBAGE_PORT", "not-a-number");
        let result: Result<u16> = parse_env("MAVERICKS_TEST_GARBAGE_PORT", 8080);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("MAVERICKS_TEST_GARBAGE_PORT"), "{message}");
    }

    #[test]
    fn test_blank_env_is_treated_as_unset() {
        std::env::set_var("MAVERICKS_TEST_BLANK_KEY", "   ");
        assert!(optional_env("MAVERICKS_TEST_BLANK_KEY").is_none());
    }
}
