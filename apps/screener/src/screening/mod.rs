// Extraction-and-scoring core.
// Implements: normalization, contact/skill/experience/education extraction, fit scoring, export.
// Everything below handlers.rs is pure and synchronous — no I/O, no shared mutable state.

pub mod contact;
pub mod education;
pub mod experience;
pub mod export;
pub mod extraction;
pub mod fit_scoring;
pub mod handlers;
pub mod normalize;
pub mod skills;

pub use extraction::{extract, ExtractionResult};
pub use fit_scoring::{FitScorer, LexicalFitScorer, ScoreBreakdown};
pub use skills::SkillVocabulary;
