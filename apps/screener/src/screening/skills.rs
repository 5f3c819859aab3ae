#![allow(dead_code)]

//! Skill extractor — lexical presence of a fixed vocabulary in free text.
//!
//! Matching is exact substring after normalization; there is no fuzzy or
//! synonym matching. A token counts as present when it occurs in the
//! normalized text, or when its space-stripped form occurs in the
//! space-stripped text ("Power BI" vs "powerbi").

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::screening::normalize::{normalize, strip_spaces};

const BUILTIN_SKILLS: &[&str] = &[
    // Generic
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "sql",
    "nosql",
    "postgresql",
    "mysql",
    "mongodb",
    "excel",
    "power bi",
    "tableau",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "fastapi",
    "django",
    "flask",
    "streamlit",
    "react",
    "node",
    "express",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "bash",
    "nlp",
    "ocr",
    "openai",
    "llm",
    "rag",
    "spacy",
    "nltk",
    "transformers",
    "pytorch",
    "tensorflow",
    "api",
    "rest",
    "graphql",
    "microservices",
    // Ops / HR / Finance
    "tally",
    "zoho books",
    "quickbooks",
    "payroll",
    "ats",
    "hcm",
    "hrms",
    "excel vlookup",
    "pivot",
    "power query",
];

static BUILTIN: LazyLock<SkillVocabulary> =
    LazyLock::new(|| SkillVocabulary::new(BUILTIN_SKILLS.iter().copied()));

#[derive(Debug, Clone, PartialEq, Eq)]
struct SkillToken {
    token: String,
    /// `token` with spaces removed, precomputed for the compact comparison.
    compact: String,
}

/// Ordered, duplicate-free set of lowercase skill tokens. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    tokens: Vec<SkillToken>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, lowercasing and trimming each token. Empty tokens
    /// are dropped; repeats keep their first position.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let tokens = tokens
            .into_iter()
            .filter_map(|raw| {
                let token = normalize(raw.as_ref());
                if token.is_empty() || !seen.insert(token.clone()) {
                    return None;
                }
                let compact = strip_spaces(&token);
                Some(SkillToken { token, compact })
            })
            .collect();
        Self { tokens }
    }

    /// The process-wide default vocabulary.
    pub fn builtin() -> &'static SkillVocabulary {
        &BUILTIN
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.token.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Resume-side extraction: normalized substring OR compact substring.
    /// Returned lexicographically sorted.
    pub fn extract_skills(&self, raw_text: &str) -> Vec<String> {
        let spaced = normalize(raw_text);
        let compact = strip_spaces(&spaced);

        let found: BTreeSet<&str> = self
            .tokens
            .iter()
            .filter(|t| {
                spaced.contains(t.token.as_str()) || compact.contains(t.compact.as_str())
            })
            .map(|t| t.token.as_str())
            .collect();

        found.into_iter().map(str::to_string).collect()
    }

    /// Job-description-side extraction: compact substring only.
    ///
    /// A spaced match always implies a compact one, so this agrees with
    /// [`Self::extract_skills`] on the same text. Returned as a set because the
    /// scorer intersects and subtracts it.
    pub fn job_description_skills(&self, jd_text: &str) -> BTreeSet<String> {
        let compact = strip_spaces(&normalize(jd_text));
        self.tokens
            .iter()
            .filter(|t| compact.contains(t.compact.as_str()))
            .map(|t| t.token.clone())
            .collect()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// [`SkillVocabulary::extract_skills`] against the built-in vocabulary.
pub fn extract_skills(raw_text: &str) -> Vec<String> {
    SkillVocabulary::builtin().extract_skills(raw_text)
}
