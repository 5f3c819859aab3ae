//! Education detector — any recognised degree token anywhere in the text.

use std::sync::LazyLock;

use regex::Regex;

// Plain substring alternation, no word boundaries: "ba" inside "database" counts.
static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:b\.?tech|bachelor|be|bsc|msc|mtech|m\.?tech|mba|bca|mca|bcom|mcom|ba|ma)",
    )
    .expect("degree pattern is valid")
});

pub fn has_degree(raw_text: &str) -> bool {
    DEGREE_RE.is_match(raw_text)
}
