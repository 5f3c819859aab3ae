//! Experience extractor — "N years" style mentions.
//!
//! Resumes restate the same total in several places ("5 years ... 5+ years in X"),
//! so the largest mention wins instead of a sum.

use std::sync::LazyLock;

use regex::Regex;

use crate::screening::normalize::normalize;

static RESUME_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(?:\+?\s*)?(?:years?|yrs?)").expect("years pattern is valid")
});

static JD_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\+?\s*(?:yrs?|years?)").expect("jd years pattern is valid")
});

/// Largest years mention in raw resume text, `None` when there is none.
pub fn extract_years(raw_text: &str) -> Option<u32> {
    max_capture(&RESUME_YEARS_RE, raw_text)
}

/// Years required by a job description; 0 when it states none.
///
/// Runs over the normalized text with a slightly stricter pattern: the `+`
/// must hug the number ("3+ years", not "3 + years").
pub fn required_years(jd_text: &str) -> u32 {
    max_capture(&JD_YEARS_RE, &normalize(jd_text)).unwrap_or(0)
}

fn max_capture(re: &Regex, text: &str) -> Option<u32> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|digits| parse_saturating(digits.as_str()))
        .max()
}

// The pattern only admits ASCII digits, so the only failure left is overflow.
fn parse_saturating(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}
