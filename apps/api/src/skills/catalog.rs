//! Keyword Catalog — canonical skill vocabulary and the aliases that identify each skill.
//!
//! The same alias table drives both resume matching and canonicalization of
//! skill names returned by the remote analyzer (`js` → `javascript`). Names
//! that are ordinary English words (`go`, `node`, `rest`, `swift`) are
//! accepted from the analyzer but never matched in free text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grouping used when presenting an extracted skill set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "Programming Languages")]
    ProgrammingLanguage,
    #[serde(rename = "Frameworks & Libraries")]
    FrameworkOrLibrary,
    #[serde(rename = "Databases")]
    Database,
    #[serde(rename = "Tools & Platforms")]
    ToolOrPlatform,
    #[serde(rename = "Cloud Services")]
    CloudService,
    #[serde(rename = "Other")]
    Other,
}

use SkillCategory::*;

/// Canonical name, category, text aliases, and loose names (analyzer-only).
/// The canonical name is matched in text unless it is listed as loose.
type SkillRow = (&'static str, SkillCategory, &'static [&'static str], &'static [&'static str]);

const DEFAULT_SKILLS: &[SkillRow] = &[
    ("python", ProgrammingLanguage, &["py", "python3"], &[]),
    ("java", ProgrammingLanguage, &[], &[]),
    ("javascript", ProgrammingLanguage, &["js", "ecmascript", "es6"], &[]),
    ("typescript", ProgrammingLanguage, &["ts"], &[]),
    ("c++", ProgrammingLanguage, &["cpp"], &[]),
    ("c#", ProgrammingLanguage, &["csharp"], &[]),
    ("ruby", ProgrammingLanguage, &[], &[]),
    ("php", ProgrammingLanguage, &[], &[]),
    ("golang", ProgrammingLanguage, &[], &["go"]),
    ("rust", ProgrammingLanguage, &[], &[]),
    ("swift", ProgrammingLanguage, &["swiftui"], &["swift"]),
    ("react", FrameworkOrLibrary, &["reactjs", "react.js"], &[]),
    ("angular", FrameworkOrLibrary, &["angularjs"], &[]),
    ("vue", FrameworkOrLibrary, &["vuejs", "vue.js"], &[]),
    ("node.js", FrameworkOrLibrary, &["nodejs"], &["node"]),
    ("flask", FrameworkOrLibrary, &[], &[]),
    ("django", FrameworkOrLibrary, &[], &[]),
    ("tensorflow", FrameworkOrLibrary, &[], &[]),
    ("pytorch", FrameworkOrLibrary, &[], &[]),
    ("sql", Database, &[], &[]),
    ("postgresql", Database, &["postgres"], &[]),
    ("mysql", Database, &[], &[]),
    ("mongodb", Database, &["mongo"], &[]),
    ("redis", Database, &[], &[]),
    ("elasticsearch", Database, &["elastic search"], &[]),
    ("git", ToolOrPlatform, &[], &[]),
    ("gitlab", ToolOrPlatform, &[], &[]),
    ("jenkins", ToolOrPlatform, &[], &[]),
    ("docker", ToolOrPlatform, &[], &[]),
    ("kubernetes", ToolOrPlatform, &["k8s"], &[]),
    ("linux", ToolOrPlatform, &[], &[]),
    ("bash", ToolOrPlatform, &["shell scripting"], &[]),
    ("aws", CloudService, &["amazon web services"], &[]),
    ("azure", CloudService, &[], &[]),
    ("html", Other, &["html5"], &[]),
    ("css", Other, &["css3"], &[]),
    ("api", Other, &["apis"], &[]),
    ("rest api", Other, &["restful", "rest apis"], &["rest"]),
    ("microservices", Other, &["microservice"], &[]),
    ("machine learning", Other, &["ml"], &[]),
    ("data science", Other, &[], &[]),
];

/// One catalog entry: a canonical skill and the names that identify it.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub canonical: String,
    pub category: SkillCategory,
    /// Lower-cased terms searched for in resume text.
    pub patterns: Vec<String>,
    /// Names accepted when canonicalizing analyzer output but never matched in text.
    pub loose: Vec<String>,
}

impl SkillEntry {
    pub fn new(canonical: &str, category: SkillCategory) -> Self {
        let canonical = normalize(canonical);
        Self {
            patterns: vec![canonical.clone()],
            canonical,
            category,
            loose: Vec::new(),
        }
    }

    pub fn aliases<'a>(mut self, aliases: impl IntoIterator<Item = &'a str>) -> Self {
        for alias in aliases.into_iter().map(normalize) {
            if !alias.is_empty() && !self.patterns.contains(&alias) {
                self.patterns.push(alias);
            }
        }
        self
    }

    /// Marks names as too common in prose to match in text. Listing the
    /// canonical name here removes it from `patterns` as well.
    pub fn loose<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names.into_iter().map(normalize) {
            if name.is_empty() {
                continue;
            }
            self.patterns.retain(|p| *p != name);
            if !self.loose.contains(&name) {
                self.loose.push(name);
            }
        }
        self
    }
}

/// Immutable skill vocabulary. Built once at startup and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    entries: Vec<SkillEntry>,
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().map(|(name, category, aliases, loose)| {
            SkillEntry::new(name, *category)
                .aliases(aliases.iter().copied())
                .loose(loose.iter().copied())
        }))
    }
}

impl KeywordCatalog {
    /// Builds a catalog from entries; later entries with an already-seen
    /// (or empty) canonical name are dropped.
    pub fn new(skills: impl IntoIterator<Item = SkillEntry>) -> Self {
        let mut entries: Vec<SkillEntry> = Vec::new();
        for entry in skills {
            if entry.canonical.is_empty() || entries.iter().any(|e| e.canonical == entry.canonical) {
                continue;
            }
            entries.push(entry);
        }
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn contains(&self, skill: &str) -> bool {
        let skill = normalize(skill);
        self.entries.iter().any(|e| e.canonical == skill)
    }

    /// Maps a free-form skill name onto the canonical vocabulary.
    /// Canonical names win over aliases, then text aliases over loose names.
    pub fn canonicalize(&self, name: &str) -> Option<&str> {
        self.entry_for(name).map(|e| e.canonical.as_str())
    }

    /// Returns canonical names of every entry with at least one pattern present in `text`,
    /// in catalog order.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let haystack = text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.patterns.iter().any(|p| contains_term(&haystack, p)))
            .map(|e| e.canonical.as_str())
            .collect()
    }

    /// Groups skills by category. Unknown names land in `Other`; empty
    /// categories are omitted.
    pub fn categorize<'a>(
        &self,
        skills: impl IntoIterator<Item = &'a str>,
    ) -> BTreeMap<SkillCategory, Vec<String>> {
        let mut grouped: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
        for skill in skills {
            let category = self.entry_for(skill).map_or(Other, |e| e.category);
            grouped.entry(category).or_default().push(skill.to_string());
        }
        grouped
    }

    fn entry_for(&self, name: &str) -> Option<&SkillEntry> {
        let name = normalize(name);
        if name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.canonical == name)
            .or_else(|| self.entries.iter().find(|e| e.patterns.contains(&name)))
            .or_else(|| self.entries.iter().find(|e| e.loose.contains(&name)))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True when `term` occurs in `haystack` with no alphanumeric character directly
/// on either side. Both inputs are expected to be lower-cased already.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
