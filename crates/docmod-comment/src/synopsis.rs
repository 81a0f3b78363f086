//! Package synopsis extraction.

/// Leading phrases that mark a comment as something other than documentation.
const ILLEGAL_PREFIXES: [&str; 3] = ["copyright", "all rights", "author"];

/// Extract the one-sentence summary of a doc comment.
///
/// The summary is the first sentence of the first paragraph, with all
/// whitespace runs collapsed to a single space. A sentence ends at a `.`
/// followed by whitespace, unless the period follows a single upper-case
/// letter (an initial such as `J. Smith`).
///
/// Comments that start with a copyright or author notice have no synopsis.
#[must_use]
pub fn synopsis(text: &str) -> String {
    let paragraph = first_paragraph(text.trim_start());
    let sentence = &paragraph[..first_sentence_len(paragraph)];
    let cleaned = collapse_whitespace(sentence);

    let lower = cleaned.to_lowercase();
    if ILLEGAL_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return String::new();
    }

    cleaned.replace("``", "\u{201c}").replace("''", "\u{201d}")
}

/// Text up to the first blank line.
fn first_paragraph(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}

/// Byte length of the first sentence.
fn first_sentence_len(text: &str) -> usize {
    let (mut ppp, mut pp, mut p) = (' ', ' ', ' ');
    for (i, c) in text.char_indices() {
        let c = if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c };
        if c == ' ' && p == '.' && (!pp.is_uppercase() || ppp.is_uppercase()) {
            return i;
        }
        if p == '\u{3002}' || p == '\u{ff0e}' {
            return i;
        }
        (ppp, pp, p) = (pp, p, c);
    }
    text.len()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
