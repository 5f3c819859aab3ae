#![allow(dead_code)]

//! Fit Scoring — combines job-description and resume signals into a 0–100 score.
//!
//! Default: `LexicalFitScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn FitScorer>` so the handlers never name a backend.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::screening::education::has_degree;
use crate::screening::experience::{extract_years, required_years};
use crate::screening::skills::SkillVocabulary;

/// Points per matched skill.
pub const POINTS_PER_SKILL: u32 = 8;
/// Ceiling of the skill sub-score (reached at 9 matched skills).
pub const MAX_SKILL_SCORE: u32 = 70;
/// Resume meets a stated experience requirement.
pub const EXPERIENCE_MET_SCORE: u32 = 15;
/// Resume mentions some experience but the requirement is unmet or unstated.
pub const EXPERIENCE_PARTIAL_SCORE: u32 = 8;
pub const DEGREE_SCORE: u32 = 15;
/// Baseline when no degree is detected: uncertainty, not a penalty.
pub const NO_DEGREE_SCORE: u32 = 5;
pub const MAX_TOTAL_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Full score report for one job description / resume pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: u32, // 0 – 100
    pub matched_skills: Vec<String>, // sorted
    pub missing_skills: Vec<String>, // sorted, JD skills absent from the resume
    pub resume_years: u32,
    pub jd_years: u32,
    pub has_degree: bool,
    pub skill_score: u32,
    pub experience_score: u32,
    pub education_score: u32,
    pub scorer_backend: String, // "lexical" — for transparency
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn FitScorer>`.
pub trait FitScorer: Send + Sync {
    fn score(&self, jd_text: &str, resume_text: &str) -> ScoreBreakdown;

    /// Vocabulary the backend reads skills from, reused for the resume-only extraction.
    fn vocabulary(&self) -> &SkillVocabulary;
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalFitScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Substring-based scorer over a fixed skill vocabulary.
///
/// Algorithm:
/// 1. JD skills: vocabulary tokens present in the compact JD text
/// 2. Resume skills: full two-way skill extraction
/// 3. skill = min(70, 8 × |matched|)
/// 4. experience = 15 if JD asks for years and the resume meets it,
///    8 if the resume mentions any years, else 0
/// 5. education = 15 with a detected degree, else 5
/// 6. total = min(100, skill + experience + education)
#[derive(Debug, Clone)]
pub struct LexicalFitScorer {
    vocabulary: SkillVocabulary,
}

impl LexicalFitScorer {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self { vocabulary }
    }
}

impl Default for LexicalFitScorer {
    fn default() -> Self {
        Self::new(SkillVocabulary::default())
    }
}

impl FitScorer for LexicalFitScorer {
    fn score(&self, jd_text: &str, resume_text: &str) -> ScoreBreakdown {
        compute_lexical_fit(&self.vocabulary, jd_text, resume_text)
    }

    fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }
}

/// Scores against the built-in vocabulary.
pub fn score(jd_text: &str, resume_text: &str) -> ScoreBreakdown {
    compute_lexical_fit(SkillVocabulary::builtin(), jd_text, resume_text)
}

// ────────────────────────────────────────────────────────────────────────────
// Core lexical fit algorithm
// ────────────────────────────────────────────────────────────────────────────

fn compute_lexical_fit(
    vocabulary: &SkillVocabulary,
    jd_text: &str,
    resume_text: &str,
) -> ScoreBreakdown {
    let jd_skills = vocabulary.job_description_skills(jd_text);
    let resume_skills: BTreeSet<String> =
        vocabulary.extract_skills(resume_text).into_iter().collect();

    let matched_skills: Vec<String> = jd_skills.intersection(&resume_skills).cloned().collect();
    let missing_skills: Vec<String> = jd_skills.difference(&resume_skills).cloned().collect();

    let resume_years = extract_years(resume_text).unwrap_or(0);
    let jd_years = required_years(jd_text);
    let degree = has_degree(resume_text);

    let skill_score = skill_score(matched_skills.len());
    let experience_score = experience_score(resume_years, jd_years);
    let education_score = education_score(degree);
    let score = (skill_score + experience_score + education_score).min(MAX_TOTAL_SCORE);

    debug!(
        matched = matched_skills.len(),
        missing = missing_skills.len(),
        resume_years,
        jd_years,
        degree,
        score,
        "lexical fit computed"
    );

    ScoreBreakdown {
        score,
        matched_skills,
        missing_skills,
        resume_years,
        jd_years,
        has_degree: degree,
        skill_score,
        experience_score,
        education_score,
        scorer_backend: "lexical".to_string(),
    }
}

fn skill_score(matched: usize) -> u32 {
    let matched = u32::try_from(matched).unwrap_or(u32::MAX);
    matched.saturating_mul(POINTS_PER_SKILL).min(MAX_SKILL_SCORE)
}

fn experience_score(resume_years: u32, jd_years: u32) -> u32 {
    if jd_years > 0 && resume_years >= jd_years {
        EXPERIENCE_MET_SCORE
    } else if resume_years > 0 {
        EXPERIENCE_PARTIAL_SCORE
    } else {
        0
    }
}

fn education_score(has_degree: bool) -> u32 {
    if has_degree {
        DEGREE_SCORE
    } else {
        NO_DEGREE_SCORE
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JD: &str = "Python, SQL, 3+ years experience, Bachelor's required";
    const RESUME: &str =
        "Experienced Python developer, 5 years, B.Tech degree, knows SQL and Docker";

    #[test]
    fn test_reference_scenario() {
        let report = score(JD, RESUME);
        assert_eq!(report.matched_skills, vec!["python", "sql"]);
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.resume_years, 5);
        assert_eq!(report.jd_years, 3);
        assert!(report.has_degree);
        assert_eq!(report.skill_score, 16);
        assert_eq!(report.experience_score, 15);
        assert_eq!(report.education_score, 15);
        assert_eq!(report.score, 46);
    }

    #[test]
    fn test_empty_inputs_score_baseline() {
        let report = score("", "");
        assert_eq!(report.score, 5);
        assert!(report.matched_skills.is_empty());
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.resume_years, 0);
        assert_eq!(report.jd_years, 0);
        assert!(!report.has_degree);
    }

    #[test]
    fn test_missing_skills_listed() {
        let report = score("Docker and Kubernetes on AWS", "Docker only");
        assert_eq!(report.matched_skills, vec!["docker"]);
        assert_eq!(report.missing_skills, vec!["aws", "kubernetes"]);
    }

    #[test]
    fn test_skill_score_saturates_at_70() {
        assert_eq!(skill_score(0), 0);
        assert_eq!(skill_score(8), 64);
        assert_eq!(skill_score(9), 70);
        assert_eq!(skill_score(40), 70);
    }

    #[test]
    fn test_experience_score_tiers() {
        assert_eq!(experience_score(5, 3), 15);
        assert_eq!(experience_score(3, 3), 15);
        assert_eq!(experience_score(2, 3), 8);
        // No stated requirement: any mention is partial credit.
        assert_eq!(experience_score(10, 0), 8);
        assert_eq!(experience_score(0, 3), 0);
        assert_eq!(experience_score(0, 0), 0);
    }

    #[test]
    fn test_total_capped_at_100() {
        let skills = "python java javascript typescript sql mongodb docker kubernetes aws azure";
        let jd = format!("{skills} 2+ years");
        let resume = format!("{skills} 4 years MBA");
        let report = score(&jd, &resume);
        assert_eq!(report.skill_score, 70);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_custom_vocabulary_scorer() {
        let scorer = LexicalFitScorer::new(SkillVocabulary::new(["rust"]));
        let report = scorer.score("Rust and Python", "rust");
        assert_eq!(report.matched_skills, vec!["rust"]);
        assert_eq!(report.scorer_backend, "lexical");
    }

    proptest! {
        #[test]
        fn prop_score_bounded_for_any_input(jd in ".{0,200}", resume in ".{0,200}") {
            let report = score(&jd, &resume);
            prop_assert!(report.score <= 100);
            prop_assert!(report.score >= NO_DEGREE_SCORE);
            prop_assert_eq!(
                report.score,
                (report.skill_score + report.experience_score + report.education_score).min(100)
            );
        }

        #[test]
        fn prop_matched_and_missing_partition_jd_skills(jd in "[a-z +#]{0,120}", resume in "[a-z +#]{0,120}") {
            let report = score(&jd, &resume);
            let matched: BTreeSet<_> = report.matched_skills.iter().cloned().collect();
            let missing: BTreeSet<_> = report.missing_skills.iter().cloned().collect();
            prop_assert!(matched.is_disjoint(&missing));
            let union: BTreeSet<_> = matched.union(&missing).cloned().collect();
            prop_assert_eq!(union, SkillVocabulary::builtin().job_description_skills(&jd));
        }

        #[test]
        fn prop_skill_score_monotonic(n in 0usize..64) {
            prop_assert!(skill_score(n) <= skill_score(n + 1));
        }
    }
}
