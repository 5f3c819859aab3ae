//! Per-document extraction: runs every extractor over one text.

use serde::{Deserialize, Serialize};

use crate::screening::contact::extract_contacts;
use crate::screening::education::has_degree;
use crate::screening::experience::extract_years;
use crate::screening::skills::SkillVocabulary;

/// Signals pulled out of a single document. Built per request, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// First-seen order, de-duplicated, at most two.
    pub emails: Vec<String>,
    /// Same constraints as `emails`.
    pub phones: Vec<String>,
    /// Sorted.
    pub skills: Vec<String>,
    pub years: Option<u32>,
    pub has_degree: bool,
}

pub fn extract(raw_text: &str, vocabulary: &SkillVocabulary) -> ExtractionResult {
    let contacts = extract_contacts(raw_text);
    ExtractionResult {
        emails: contacts.emails,
        phones: contacts.phones,
        skills: vocabulary.extract_skills(raw_text),
        years: extract_years(raw_text),
        has_degree: has_degree(raw_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_collects_every_signal() {
        let text = "Jane Roe | jane@roe.dev | 9876543210\nB.Tech, 4 years with Docker and SQL";
        let result = extract(text, SkillVocabulary::builtin());

        assert_eq!(result.emails, vec!["jane@roe.dev"]);
        assert_eq!(result.phones, vec!["9876543210"]);
        assert_eq!(result.skills, vec!["docker", "sql"]);
        assert_eq!(result.years, Some(4));
        assert!(result.has_degree);
    }

    #[test]
    fn test_extract_empty_text_is_all_defaults() {
        let result = extract("", SkillVocabulary::builtin());
        assert_eq!(result, ExtractionResult::default());
    }

    #[test]
    fn test_custom_vocabulary_is_respected() {
        let vocab = SkillVocabulary::new(["rust", "tokio"]);
        let result = extract("Rust + Tokio + Python", &vocab);
        assert_eq!(result.skills, vec!["rust", "tokio"]);
    }
}
