//! Input sanitization for encoded names
//!
//! The grammar reserves `|` and `:` as delimiters, so free-text fields
//! are cleaned on write. Decoding stays unambiguous because sanitized
//! text can never reintroduce a delimiter.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Sanitize a free-text label for use inside a block name
///
/// Strips the delimiter characters `|` and `:` and collapses whitespace
/// runs to single spaces.
#[must_use]
pub fn sanitize_label(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '|' && *c != ':').collect();
    WHITESPACE_RUNS.replace_all(stripped.trim(), " ").into_owned()
}

/// Sanitize a page name for use in an Accessibility Root name
///
/// Collapses whitespace runs and strips literal `|`; `:` is allowed here
/// because root names never carry a subtype segment.
#[must_use]
pub fn sanitize_page_name(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '|').collect();
    WHITESPACE_RUNS.replace_all(stripped.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_strips_delimiters() {
        assert_eq!(sanitize_label("a|b:c"), "abc");
    }

    #[test]
    fn label_collapses_whitespace() {
        assert_eq!(sanitize_label("  hello   world\t!"), "hello world !");
    }

    #[test]
    fn page_name_keeps_colons() {
        assert_eq!(sanitize_page_name("Flow: Checkout |v2"), "Flow: Checkout v2");
    }

    #[test]
    fn already_clean_input_is_unchanged() {
        assert_eq!(sanitize_label("Submit button"), "Submit button");
    }
}
