//! Text normalizer — canonical form used before every lexical match.

/// Lowercases `text`, collapses every whitespace run (newlines included) into a
/// single space and trims both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drops every space, so "power bi" and "powerbi" compare equal. Expects normalized input.
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        assert_eq!(
            normalize("  Senior\tRust \n\n Engineer  "),
            "senior rust engineer"
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_does_not_touch_punctuation() {
        assert_eq!(normalize("C++,  C#"), "c++, c#");
    }

    #[test]
    fn test_strip_spaces_after_normalize() {
        assert_eq!(strip_spaces(&normalize("Power  BI\nand Zoho Books")), "powerbiandzohobooks");
    }
}
