//! Contact extractor — emails and phone numbers from raw (un-normalized) text.

use std::sync::LazyLock;

use regex::Regex;

/// At most this many emails and phones are kept per document.
pub const MAX_CONTACTS: usize = 2;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("email pattern is valid")
});

// Optional `+` and 1-3 digit country code, then exactly ten digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?[0-9]{1,3}[- ]?)?[0-9]{10}").expect("phone pattern is valid")
});

/// Emails and phones found in one document, each de-duplicated and capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contacts {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Scans the raw text so digits and symbols survive untouched.
pub fn extract_contacts(raw_text: &str) -> Contacts {
    Contacts {
        emails: first_unique(&EMAIL_RE, raw_text, MAX_CONTACTS),
        phones: first_unique(&PHONE_RE, raw_text, MAX_CONTACTS),
    }
}

/// Collects matches in first-seen order, skipping repeats, stopping at `cap`.
fn first_unique(re: &Regex, text: &str, cap: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::with_capacity(cap);
    for m in re.find_iter(text) {
        if found.len() == cap {
            break;
        }
        if !found.iter().any(|f| f == m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }
    found
}
