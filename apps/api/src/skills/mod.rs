// Skill extraction: keyword catalog, remote analyzer seam, extractor.
// All LLM calls go through llm_client.

pub mod catalog;
pub mod extractor;
pub mod prompts;

pub use catalog::{KeywordCatalog, SkillCategory};
pub use extractor::{ExtractionSource, LlmSkillAnalyzer, SkillExtractor, SkillSet};
