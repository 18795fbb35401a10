//! Skill Extractor — turns resume text into a canonical `SkillSet`.
//!
//! Two branches:
//! 1. A `SkillAnalyzer` is configured: ask it, bounded by a timeout, and
//!    canonicalize its answer through the `KeywordCatalog`.
//! 2. No analyzer, or the analyzer failed: match catalog aliases locally.
//!
//! Analyzer failures never reach the caller.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::skills::catalog::{KeywordCatalog, SkillCategory};
use crate::skills::prompts::{skill_extraction_system, SKILL_EXTRACTION_PROMPT_TEMPLATE};

/// Deduplicated canonical skill names, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Which branch produced a `SkillSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Analyzer,
    Keywords,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillExtraction {
    pub skills: SkillSet,
    pub source: ExtractionSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Collaborator seam
// ────────────────────────────────────────────────────────────────────────────

/// A remote service that lists the skills mentioned in a piece of text.
/// Names are returned as the service spells them; the extractor canonicalizes.
#[async_trait]
pub trait SkillAnalyzer: Send + Sync {
    async fn analyze_text(&self, text: &str) -> Result<Vec<String>, LlmError>;

    /// Short label for logs and the health endpoint.
    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct AnalyzerPayload {
    skills: Vec<String>,
}

/// `SkillAnalyzer` backed by the chat completions API.
pub struct LlmSkillAnalyzer(pub LlmClient);

#[async_trait]
impl SkillAnalyzer for LlmSkillAnalyzer {
    async fn analyze_text(&self, text: &str) -> Result<Vec<String>, LlmError> {
        let prompt = SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", text);
        let payload: AnalyzerPayload = self
            .0
            .call_json(&prompt, &skill_extraction_system())
            .await?;
        Ok(payload.skills)
    }

    fn name(&self) -> &str {
        self.0.model()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SkillExtractor {
    catalog: Arc<KeywordCatalog>,
    analyzer: Option<Arc<dyn SkillAnalyzer>>,
    timeout: Duration,
}

impl SkillExtractor {
    /// Keyword-only extractor.
    pub fn new(catalog: Arc<KeywordCatalog>) -> Self {
        Self {
            catalog,
            analyzer: None,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn SkillAnalyzer>, timeout: Duration) -> Self {
        self.analyzer = Some(analyzer);
        self.timeout = timeout;
        self
    }

    pub fn analyzer_name(&self) -> Option<&str> {
        self.analyzer.as_deref().map(|a| a.name())
    }

    /// Canonical skills in `resume_text`, tagged with the branch that found them.
    pub async fn extract(&self, resume_text: &str) -> SkillExtraction {
        if resume_text.trim().is_empty() {
            return SkillExtraction {
                skills: SkillSet::new(),
                source: ExtractionSource::Keywords,
            };
        }

        if let Some(analyzer) = &self.analyzer {
            match self.ask_analyzer(analyzer.as_ref(), resume_text).await {
                Ok(skills) => {
                    info!("Analyzer extracted {} skills", skills.len());
                    return SkillExtraction {
                        skills,
                        source: ExtractionSource::Analyzer,
                    };
                }
                Err(e) => warn!(
                    "Skill analyzer '{}' unavailable, falling back to keywords: {e}",
                    analyzer.name()
                ),
            }
        }

        let skills = self.extract_keywords(resume_text);
        info!("Keyword matching extracted {} skills", skills.len());
        SkillExtraction {
            skills,
            source: ExtractionSource::Keywords,
        }
    }

    pub fn categorize(&self, skills: &SkillSet) -> BTreeMap<SkillCategory, Vec<String>> {
        self.catalog.categorize(skills.iter())
    }

    /// The local fallback branch, always available.
    pub fn extract_keywords(&self, resume_text: &str) -> SkillSet {
        self.catalog.matches(resume_text).into_iter().collect()
    }

    async fn ask_analyzer(
        &self,
        analyzer: &dyn SkillAnalyzer,
        resume_text: &str,
    ) -> Result<SkillSet, LlmError> {
        let names = tokio::time::timeout(self.timeout, analyzer.analyze_text(resume_text))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        Ok(names
            .iter()
            .filter_map(|name| self.catalog.canonicalize(name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAnalyzer(Vec<&'static str>);

    #[async_trait]
    impl SkillAnalyzer for FixedAnalyzer {
        async fn analyze_text(&self, _text: &str) -> Result<Vec<String>, LlmError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl SkillAnalyzer for FailingAnalyzer {
        async fn analyze_text(&self, _text: &str) -> Result<Vec<String>, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "upstream down".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct MalformedAnalyzer;

    #[async_trait]
    impl SkillAnalyzer for MalformedAnalyzer {
        async fn analyze_text(&self, _text: &str) -> Result<Vec<String>, LlmError> {
            let payload: AnalyzerPayload = crate::llm_client::parse_json_text("not json")?;
            Ok(payload.skills)
        }

        fn name(&self) -> &str {
            "malformed"
        }
    }

    struct SlowAnalyzer;

    #[async_trait]
    impl SkillAnalyzer for SlowAnalyzer {
        async fn analyze_text(&self, _text: &str) -> Result<Vec<String>, LlmError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec!["rust".to_string()])
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    fn keyword_extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(KeywordCatalog::default()))
    }

    fn extractor_with(analyzer: impl SkillAnalyzer + 'static) -> SkillExtractor {
        keyword_extractor().with_analyzer(Arc::new(analyzer), Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_empty_text_yields_empty_set() {
        let skills = keyword_extractor().extract("").await.skills;
        assert!(skills.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_skips_analyzer() {
        let extraction = extractor_with(FixedAnalyzer(vec!["python"]))
            .extract("   ")
            .await;
        assert!(extraction.skills.is_empty());
        assert_eq!(extraction.source, ExtractionSource::Keywords);
    }

    #[tokio::test]
    async fn test_keyword_fallback_finds_python_and_react() {
        let skills = keyword_extractor()
            .extract("I know Python and React")
            .await
            .skills;
        assert!(skills.contains("python"));
        assert!(skills.contains("react"));
    }

    #[tokio::test]
    async fn test_keyword_fallback_exact_set() {
        let skills = keyword_extractor()
            .extract("Experienced with Python, JavaScript and SQL")
            .await
            .skills;
        let expected: SkillSet = ["python", "javascript", "sql"].into_iter().collect();
        assert_eq!(skills, expected);
    }

    #[tokio::test]
    async fn test_analyzer_output_is_canonicalized_and_filtered() {
        let extraction = extractor_with(FixedAnalyzer(vec![
            " JS ",
            "JavaScript",
            "k8s",
            "Team Leadership",
            "",
        ]))
        .extract("irrelevant resume text")
        .await;

        assert_eq!(extraction.source, ExtractionSource::Analyzer);
        let expected: SkillSet = ["javascript", "kubernetes"].into_iter().collect();
        assert_eq!(extraction.skills, expected);
    }

    #[tokio::test]
    async fn test_analyzer_with_only_unknown_names_is_authoritative() {
        let extraction = extractor_with(FixedAnalyzer(vec!["Team Leadership", "Excel", "COBOL"]))
            .extract("Python and SQL on the side")
            .await;
        assert_eq!(extraction.source, ExtractionSource::Analyzer);
        assert!(extraction.skills.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_fallback_ignores_everyday_words() {
        let extraction = keyword_extractor()
            .extract(
                "Ready to go the extra mile; I led the rest of the team and each node of the org chart",
            )
            .await;
        assert_eq!(extraction.source, ExtractionSource::Keywords);
        assert!(extraction.skills.is_empty(), "{:?}", extraction.skills);
    }

    #[tokio::test]
    async fn test_analyzer_loose_names_are_canonicalized() {
        let extraction = extractor_with(FixedAnalyzer(vec!["Go", "REST", "Node"]))
            .extract("irrelevant resume text")
            .await;
        let expected: SkillSet = ["golang", "node.js", "rest api"].into_iter().collect();
        assert_eq!(extraction.skills, expected);
    }

    #[test]
    fn test_categorize_uses_catalog_groups() {
        let skills: SkillSet = ["docker", "python", "react"].into_iter().collect();
        let grouped = keyword_extractor().categorize(&skills);
        assert_eq!(grouped[&SkillCategory::ProgrammingLanguage], vec!["python"]);
        assert_eq!(grouped[&SkillCategory::FrameworkOrLibrary], vec!["react"]);
        assert_eq!(grouped[&SkillCategory::ToolOrPlatform], vec!["docker"]);
    }

    #[tokio::test]
    async fn test_analyzer_error_falls_back_to_keywords() {
        let extraction = extractor_with(FailingAnalyzer)
            .extract("Rust and Docker")
            .await;
        assert_eq!(extraction.source, ExtractionSource::Keywords);
        let expected: SkillSet = ["docker", "rust"].into_iter().collect();
        assert_eq!(extraction.skills, expected);
    }

    #[tokio::test]
    async fn test_malformed_payload_falls_back_to_keywords() {
        let extraction = extractor_with(MalformedAnalyzer)
            .extract("SQL")
            .await;
        assert_eq!(extraction.source, ExtractionSource::Keywords);
        assert!(extraction.skills.contains("sql"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_analyzer_times_out_to_keywords() {
        let extraction = extractor_with(SlowAnalyzer)
            .extract("Python developer")
            .await;
        assert_eq!(extraction.source, ExtractionSource::Keywords);
        let expected: SkillSet = ["python"].into_iter().collect();
        assert_eq!(extraction.skills, expected);
    }

    #[tokio::test]
    async fn test_output_is_always_in_vocabulary() {
        let catalog = Arc::new(KeywordCatalog::default());
        let extractor = SkillExtractor::new(catalog.clone());
        let text = "Python python PYTHON, c++, C#, node.js, NodeJS, Haskell, Erlang";
        let skills = extractor.extract(text).await.skills;
        assert!(skills.iter().all(|s| catalog.contains(s)));
        assert_eq!(skills.iter().filter(|s| *s == "python").count(), 1);
        assert!(skills.contains("c++"));
        assert!(skills.contains("c#"));
        assert!(skills.contains("node.js"));
    }

    #[test]
    fn test_skill_set_serializes_as_sorted_array() {
        let skills: SkillSet = ["sql", "python"].into_iter().collect();
        assert_eq!(serde_json::to_string(&skills).unwrap(), r#"["python","sql"]"#);
    }
}
