//! Parsing of loosely-structured model output into item lists
//!
//! The chat API returns free-form text: numbered lists, bulleted lists,
//! bold markers, sometimes a preamble line ("Here are your questions:").
//! `parse_list` turns that into clean one-item-per-line strings. Lines are
//! never joined; one line of output is one candidate item.

/// Parse free-form model output into a list of clean items
///
/// Strips numbering (`1.`, `12)`, `Q3:`), bullets (`-`, `*`, `•`),
/// surrounding bold markers and quotes, and drops blank lines and
/// preamble/trailer lines that end with a colon.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_item)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_preamble(line))
        .collect()
}

/// Clean a single line: strip list decoration and surrounding markup
fn clean_item(line: &str) -> String {
    let mut s = line.trim();

    s = strip_bullet(s);
    s = strip_numbering(s);
    // Numbered bullets ("1. - question") show up occasionally
    s = strip_bullet(s);

    // Surrounding bold markers and quotes
    let s = s.trim();
    let s = strip_wrapping(s, "**", "**");
    let s = strip_wrapping(s, "\"", "\"");
    let s = strip_wrapping(s, "\u{201c}", "\u{201d}");

    s.trim().to_string()
}

fn strip_bullet(s: &str) -> &str {
    let trimmed = s.trim_start();
    for bullet in ["- ", "* ", "\u{2022} ", "-", "*", "\u{2022}"] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            // Bare "-"/"*" prefixes only count when followed by a space or
            // the line is otherwise decoration-free; "*emphasis*" stays.
            if bullet.ends_with(' ') || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    trimmed
}

/// Strip leading `1.`, `12)`, `3:`, `Q4.`, `Q12:` style numbering
fn strip_numbering(s: &str) -> &str {
    let trimmed = s.trim_start();
    let mut rest = trimmed;

    // Optional question prefix
    if let Some(r) = rest.strip_prefix('Q').or_else(|| rest.strip_prefix('q')) {
        if r.starts_with(|c: char| c.is_ascii_digit()) {
            rest = r;
        }
    }

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return trimmed;
    }

    let after_digits = &rest[digits..];
    for sep in [". ", ") ", ": ", ".", ")", ":"] {
        if let Some(item) = after_digits.strip_prefix(sep) {
            return item.trim_start();
        }
    }

    // Digits with no separator ("1 What is...") are numbering too
    if after_digits.starts_with(' ') {
        return after_digits.trim_start();
    }

    trimmed
}

/// Strip a symmetric wrapping marker, e.g. `**bold**` or `"quoted"`
fn strip_wrapping<'a>(s: &'a str, open: &str, close: &str) -> &'a str {
    if s.len() > open.len() + close.len() {
        if let Some(inner) = s.strip_prefix(open).and_then(|r| r.strip_suffix(close)) {
            return inner;
        }
    }
    s
}

/// A preamble/trailer line introduces the list rather than belonging to it
fn is_preamble(line: &str) -> bool {
    line.ends_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list() {
        let raw = "1. What is a borrow checker?\n2. Explain lifetimes.\n3. What is Send?";
        let items = parse_list(raw);
        assert_eq!(
            items,
            vec![
                "What is a borrow checker?",
                "Explain lifetimes.",
                "What is Send?"
            ]
        );
    }

    #[test]
    fn test_multi_digit_numbering() {
        let raw = "9. Ninth question\n10. Tenth question\n11) Eleventh question";
        let items = parse_list(raw);
        assert_eq!(
            items,
            vec!["Ninth question", "Tenth question", "Eleventh question"]
        );
    }

    #[test]
    fn test_numbering_without_space() {
        let items = parse_list("1.First\n2.Second");
        assert_eq!(items, vec!["First", "Second"]);
    }

    #[test]
    fn test_bulleted_list() {
        let raw = "- Explains the water cycle\n* Names two greenhouse gases\n\u{2022} Defines albedo";
        let items = parse_list(raw);
        assert_eq!(
            items,
            vec![
                "Explains the water cycle",
                "Names two greenhouse gases",
                "Defines albedo"
            ]
        );
    }

    #[test]
    fn test_preamble_dropped() {
        let raw = "Here are your questions:\n1. What is photosynthesis?\n2. Define osmosis.";
        let items = parse_list(raw);
        assert_eq!(items, vec!["What is photosynthesis?", "Define osmosis."]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let raw = "1. First\n\n\n2. Second\n   \n3. Third";
        assert_eq!(parse_list(raw).len(), 3);
    }

    #[test]
    fn test_bold_and_quotes_stripped() {
        let raw = "1. **What is entropy?**\n2. \"Define enthalpy.\"";
        let items = parse_list(raw);
        assert_eq!(items, vec!["What is entropy?", "Define enthalpy."]);
    }

    #[test]
    fn test_question_prefix() {
        let raw = "Q1: Why is the sky blue?\nQ2. How do rainbows form?";
        let items = parse_list(raw);
        assert_eq!(items, vec!["Why is the sky blue?", "How do rainbows form?"]);
    }

    #[test]
    fn test_numbered_bullet_combo() {
        let items = parse_list("1. - Combined decoration");
        assert_eq!(items, vec!["Combined decoration"]);
    }

    #[test]
    fn test_lines_not_joined() {
        // A wrapped item stays two items; joining is the editor's job
        let raw = "1. A long question that was\nwrapped by the model";
        assert_eq!(parse_list(raw).len(), 2);
    }

    #[test]
    fn test_plain_lines_untouched() {
        let raw = "What ended the Bronze Age?\nWho were the Sea Peoples?";
        let items = parse_list(raw);
        assert_eq!(
            items,
            vec!["What ended the Bronze Age?", "Who were the Sea Peoples?"]
        );
    }

    #[test]
    fn test_interior_punctuation_preserved() {
        let items = parse_list("1. Compare O(n) vs. O(n: log n) approaches");
        assert_eq!(items, vec!["Compare O(n) vs. O(n: log n) approaches"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("\n\n").is_empty());
    }
}
